//! Input events and the fixed timestep tick
//!
//! Input arrives as discrete events drained once per frame; physics advances
//! only through `tick`.

use glam::Vec2;

use super::motion::step_all;
use super::state::SimulationState;

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Query button pressed at window pixel coordinates
    PointerPressed { x: f64, y: f64 },
    /// Pointer moved (only moves the query while the button is held)
    PointerMoved { x: f64, y: f64 },
    /// Query button released; the query stays where it was
    PointerReleased,
    /// Set the query location directly in world coordinates
    QueryAt(Vec2),
    /// Remove the active query
    ClearQuery,
    IncrementK,
    DecrementK,
    /// Window resized (pixels)
    Resize { width: u32, height: u32 },
    /// Re-seed the cloud with a fresh layout of the same size
    Regenerate,
    CloseRequested,
}

/// Apply one input event to the state
pub fn apply_event(state: &mut SimulationState, event: InputEvent) {
    match event {
        InputEvent::PointerPressed { x, y } => {
            state.query.tracking = true;
            let location = state.viewport.screen_to_world(x, y);
            if state.query.location.is_none() {
                log::debug!("Query activated at ({:.3}, {:.3})", location.x, location.y);
            }
            state.query.location = Some(location);
        }
        InputEvent::PointerMoved { x, y } => {
            if state.query.tracking {
                state.query.location = Some(state.viewport.screen_to_world(x, y));
            }
        }
        InputEvent::PointerReleased => {
            state.query.tracking = false;
        }
        InputEvent::QueryAt(location) => {
            state.query.location = Some(location);
        }
        InputEvent::ClearQuery => {
            state.query.location = None;
            state.query.tracking = false;
            log::debug!("Query cleared");
        }
        InputEvent::IncrementK => {
            state.increment_k();
            log::debug!("k = {}", state.k());
        }
        InputEvent::DecrementK => {
            state.decrement_k();
            log::debug!("k = {}", state.k());
        }
        InputEvent::Resize { width, height } => {
            // Minimised windows report zero; keep the last real size
            if width == 0 || height == 0 {
                return;
            }
            state.viewport.resize(width, height);
            log::debug!("Viewport resized to {}x{}", width, height);
        }
        InputEvent::Regenerate => {
            state.regenerate();
            log::info!(
                "Regenerated {} points (stream {})",
                state.points.len(),
                state.rng_state.stream
            );
        }
        InputEvent::CloseRequested => {
            state.close_requested = true;
        }
    }
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimulationState) {
    step_all(&mut state.points);
    state.time_ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Viewport;
    use crate::settings::Settings;
    use crate::sim::state::{Point, PointSet};

    fn square_viewport_state() -> SimulationState {
        let mut state = SimulationState::with_points(PointSet::from_points(vec![Point::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.01, 0.0),
        )]));
        state.viewport = Viewport::new(200, 200);
        state
    }

    #[test]
    fn test_tick_moves_points_and_counts() {
        let mut state = square_viewport_state();
        tick(&mut state);
        tick(&mut state);
        assert_eq!(state.time_ticks, 2);
        assert!((state.points[0].pos.x - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_tracking_only_while_pressed() {
        let mut state = square_viewport_state();
        assert_eq!(state.query.location, None);

        // Motion before pressing is ignored
        apply_event(&mut state, InputEvent::PointerMoved { x: 0.0, y: 0.0 });
        assert_eq!(state.query.location, None);

        apply_event(&mut state, InputEvent::PointerPressed { x: 100.0, y: 100.0 });
        assert_eq!(state.query.location, Some(Vec2::ZERO));

        apply_event(&mut state, InputEvent::PointerMoved { x: 200.0, y: 0.0 });
        assert_eq!(state.query.location, Some(Vec2::new(1.0, 1.0)));

        // Released: query stays, further motion is ignored
        apply_event(&mut state, InputEvent::PointerReleased);
        apply_event(&mut state, InputEvent::PointerMoved { x: 0.0, y: 200.0 });
        assert_eq!(state.query.location, Some(Vec2::new(1.0, 1.0)));

        apply_event(&mut state, InputEvent::ClearQuery);
        assert_eq!(state.query.location, None);
    }

    #[test]
    fn test_k_events() {
        let mut state = square_viewport_state();
        state.set_k(2);
        for _ in 0..3 {
            apply_event(&mut state, InputEvent::DecrementK);
        }
        assert_eq!(state.k(), 1);
        apply_event(&mut state, InputEvent::IncrementK);
        assert_eq!(state.k(), 2);
    }

    #[test]
    fn test_zero_resize_ignored() {
        let mut state = square_viewport_state();
        apply_event(&mut state, InputEvent::Resize { width: 0, height: 300 });
        assert_eq!(state.viewport, Viewport::new(200, 200));
        apply_event(&mut state, InputEvent::Resize { width: 400, height: 200 });
        assert_eq!(state.viewport, Viewport::new(400, 200));
    }

    #[test]
    fn test_close_and_regenerate() {
        let mut state = SimulationState::new(&Settings {
            num_points: 16,
            ..Default::default()
        });
        apply_event(&mut state, InputEvent::Regenerate);
        assert_eq!(state.points.len(), 16);
        assert_eq!(state.rng_state.stream, 1);

        assert!(!state.close_requested);
        apply_event(&mut state, InputEvent::CloseRequested);
        assert!(state.close_requested);
    }
}
