//! Demo controller
//!
//! Plays the game for attract mode and headless runs. Starts and restarts on
//! its own, then keeps the bird bouncing just above the bottom edge of the
//! next gap.

use super::rng::RandomSource;
use super::session::{InputEvent, Session, SessionState};
use crate::consts::*;
use crate::midline;

/// How far above the gap bottom the bird's lower edge is allowed to sink
const FLOOR_CLEARANCE: f32 = 24.0;

/// Pick this frame's input, if any
pub fn decide<R: RandomSource>(session: &Session<R>) -> Option<InputEvent> {
    match session.state {
        SessionState::Idle | SessionState::GameOver => Some(InputEvent::Flap),
        SessionState::Playing => {
            let bird = &session.bird;
            let bird_left = bird.pos.x - BIRD_WIDTH as f32 / 2.0;

            // Aim for the first pipe the bird hasn't fully cleared
            let floor = session
                .field
                .iter()
                .find(|o| o.right() > bird_left)
                .map(|o| o.gap_bottom() - FLOOR_CLEARANCE)
                .unwrap_or(midline() + session.tuning.pipe_gap / 2.0);

            let bird_bottom = bird.pos.y + BIRD_HEIGHT as f32 / 2.0;
            (bird.vel_y >= 0.0 && bird_bottom > floor).then_some(InputEvent::Flap)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_and_restarts() {
        let mut session = Session::new(3);
        assert_eq!(decide(&session), Some(InputEvent::Flap));
        session.state = SessionState::GameOver;
        assert_eq!(decide(&session), Some(InputEvent::Flap));
    }

    #[test]
    fn test_holds_while_rising() {
        let mut session = Session::new(3);
        session.state = SessionState::Playing;
        session.bird.pos.y = 500.0;
        session.bird.vel_y = -300.0;
        assert_eq!(decide(&session), None);
    }

    #[test]
    fn test_flaps_when_sinking_below_gap() {
        let mut session = Session::new(3);
        session.state = SessionState::Playing;
        let gap_bottom = session.field.obstacles[0].gap_bottom();
        session.bird.pos.y = gap_bottom;
        session.bird.vel_y = 50.0;
        assert_eq!(decide(&session), Some(InputEvent::Flap));

        // Comfortably inside the gap: let it fall
        session.bird.pos.y = session.field.obstacles[0].gap_top() + 20.0;
        assert_eq!(decide(&session), None);
    }

    #[test]
    fn test_survives_opening_stretch() {
        let mut session = Session::new(11);
        // The first pipe reaches the bird after about two seconds
        for _ in 0..120 {
            let input: Vec<InputEvent> = decide(&session).into_iter().collect();
            session.step(SIM_DT, &input);
            assert_eq!(session.state, SessionState::Playing);
        }
    }
}
