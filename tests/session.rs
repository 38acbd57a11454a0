mod common;

use common::{arm_raised_frame, single_pose, standing_frame};
use pose_coach_wasm::{
    Choreography, CoachConfig, CoachSession, GoalKind, Grade, PoseSource, RecordedPose,
    ReplaySource, RigId, ScheduledGoal,
};

fn replay_lines(frames: &[pose_coach_wasm::PoseFrame]) -> String {
    frames
        .iter()
        .map(|frame| serde_json::to_string(&frame.to_flat()).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

fn choreography() -> Choreography {
    Choreography::new(vec![
        RecordedPose::new(0.0, standing_frame()),
        RecordedPose::new(2.0, arm_raised_frame()),
        RecordedPose::new(4.0, standing_frame()),
    ])
}

#[test]
fn replayed_performance_is_scored_to_the_end() {
    let config = CoachConfig::from_json(
        r#"{
            "scoring": { "pose_window": 5 },
            "rig": { "initial_rig": "Robot", "mirrored": true }
        }"#,
    )
    .unwrap();
    let source = ReplaySource::from_json_lines(&replay_lines(&[standing_frame()]), true).unwrap();
    let goals = vec![
        ScheduledGoal::new(2.5, GoalKind::Motion, vec![
            RecordedPose::new(0.0, standing_frame()),
            RecordedPose::new(0.5, standing_frame()),
        ]),
        ScheduledGoal::new(0.5, GoalKind::Pose, single_pose(standing_frame())),
    ];
    let mut session = CoachSession::new(&config, choreography(), goals, source);
    assert_eq!(session.performer.active_rig(), RigId::Robot);
    assert!(session.performer.is_mirrored());

    let mut awarded = Vec::new();
    let mut finished_at = None;
    for step in 1..=60 {
        let time = step as f32 * 0.1;
        let report = session.tick(time);
        awarded.extend(report.grade);
        if report.finished {
            finished_at = Some(step);
            break;
        }
    }

    assert!(finished_at.is_some_and(|step| step > 40));
    assert_eq!(awarded, [Grade::Great, Grade::Great]);
    assert_eq!(session.grades(), [Grade::Great, Grade::Great]);
    assert!(session.is_finished());
}

#[test]
fn reference_follows_the_choreography() {
    let source = ReplaySource::new(vec![standing_frame()], false).unwrap();
    let mut session =
        CoachSession::new(&CoachConfig::default(), choreography(), Vec::new(), source);

    session.tick(0.0);
    let start = session.reference.part_instances();
    session.tick(2.0);
    let raised = session.reference.part_instances();
    assert_ne!(start, raised);

    // Performer stands still throughout
    let performer = session.performer.part_instances();
    session.tick(3.0);
    assert_eq!(performer, session.performer.part_instances());
}

#[test]
fn shutdown_releases_the_source_once() {
    let source = ReplaySource::new(vec![standing_frame()], true).unwrap();
    let mut session =
        CoachSession::new(&CoachConfig::default(), choreography(), Vec::new(), source);
    session.tick(0.1);

    assert!(session.shutdown().is_ok());
    assert!(session.shutdown().is_err());
    assert!(session.source_mut().next_pose().is_err());
}
