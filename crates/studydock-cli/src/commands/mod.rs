pub mod config;
pub mod drag;
pub mod timer;

use studydock_core::{Point, Size};

/// Parse `WxH`, e.g. `800x600`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    Ok(Size::new(parse_number(w)?, parse_number(h)?))
}

/// Parse `X,Y`, e.g. `100,40`.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    Ok(Point::new(parse_number(x)?, parse_number(y)?))
}

fn parse_number(s: &str) -> Result<f64, String> {
    let s = s.trim();
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{s}' is not finite"))
    }
}
