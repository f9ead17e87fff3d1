use clap::Subcommand;
use serde_json::json;
use studydock_core::{Point, PointerTarget, Size, WidgetConfig, WidgetController, WidgetKind};

use super::{parse_point, parse_size};

#[derive(Subcommand)]
pub enum DragAction {
    /// Replay a pointer drag and print every clamped position
    Simulate {
        /// Viewport size, WxH
        #[arg(long, value_parser = parse_size, default_value = "1280x720")]
        viewport: Size,
        /// Measured widget size, WxH
        #[arg(long, value_parser = parse_size, default_value = "220x220")]
        widget: Size,
        /// Widget position before the drag, X,Y
        #[arg(long, value_parser = parse_point, default_value = "20,20")]
        from: Point,
        /// Pointer-down location, X,Y
        #[arg(long, value_parser = parse_point)]
        grab: Point,
        /// Pointer locations to move through, X,Y
        #[arg(long, value_parser = parse_point, num_args = 1.., required = true)]
        path: Vec<Point>,
    },
}

pub fn run(action: DragAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DragAction::Simulate {
            viewport,
            widget,
            from,
            grab,
            path,
        } => {
            let config = WidgetConfig {
                initial_position: from,
                fallback_size: Some(widget),
                ..WidgetConfig::default()
            };
            let mut controller = WidgetController::new(WidgetKind::Timer, &config, viewport);
            controller.measure(widget);
            if !controller.pointer_down(grab, PointerTarget::Handle) {
                return Err("drag did not start".into());
            }

            for pointer in path {
                controller.pointer_move(pointer);
                let state = controller.drag_state();
                println!(
                    "{}",
                    json!({
                        "pointer": pointer,
                        "position": state.position,
                        "pointerOffset": state.pointer_offset,
                    })
                );
            }

            controller.pointer_up();
            let events = controller.drain_events();
            tracing::debug!(events = events.len(), "drag replay finished");
            println!("{}", json!({ "final": controller.position() }));
        }
    }
    Ok(())
}
