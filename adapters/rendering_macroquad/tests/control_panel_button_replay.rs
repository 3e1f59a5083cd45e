use metro_dash_rendering::ControlAction;
use metro_dash_rendering_macroquad::ControlPanelInputState;

fn run_sequence(frames: &[&[ControlAction]]) -> Vec<Vec<ControlAction>> {
    let mut state = ControlPanelInputState::default();
    let mut consumed = Vec::new();
    for presses in frames {
        consumed.push(state.take_actions());
        for &action in presses.iter() {
            state.register(action);
        }
    }

    // Flush any trailing latched presses so the harness observes the final frame.
    consumed.push(state.take_actions());
    consumed
}

#[test]
fn button_presses_fire_once_on_the_following_frame() {
    let frames: [&[ControlAction]; 4] = [
        &[],
        &[ControlAction::ToggleDriving],
        &[],
        &[ControlAction::Accelerate, ControlAction::ToggleLights],
    ];

    let first_run = run_sequence(&frames);
    let second_run = run_sequence(&frames);

    assert_eq!(
        first_run,
        vec![
            vec![],
            vec![],
            vec![ControlAction::ToggleDriving],
            vec![],
            vec![ControlAction::Accelerate, ControlAction::ToggleLights],
        ]
    );
    assert_eq!(first_run, second_run);
}

#[test]
fn repeated_presses_within_a_frame_collapse() {
    let frames: [&[ControlAction]; 1] = [&[
        ControlAction::Accelerate,
        ControlAction::Accelerate,
        ControlAction::Brake,
    ]];

    let consumed = run_sequence(&frames);

    assert_eq!(
        consumed,
        vec![vec![], vec![ControlAction::Accelerate, ControlAction::Brake]]
    );
}
