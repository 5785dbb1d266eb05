mod tests {
    use embassy_time::{Duration, Instant};
    use gauntlet_core::classifier::{Pose, PoseReading};
    use gauntlet_core::gesture::{
        HoldEvent, HoldGesture, PoseHistory, SequenceEvent, SequenceGesture, SequenceState,
    };

    const WINDOW: Duration = Duration::from_millis(1000);

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn calm_to_offer() -> SequenceGesture {
        SequenceGesture::new(Pose::Calm, Pose::Offer, WINDOW)
    }

    fn shield_hold() -> HoldGesture {
        HoldGesture::new(
            Pose::Shield,
            Duration::from_millis(3000),
            Duration::from_millis(5000),
        )
    }

    #[test]
    fn test_sequence_completes_within_window() {
        let mut gesture = calm_to_offer();
        assert_eq!(gesture.update(Pose::Calm, at(0)), SequenceEvent::Armed);
        assert_eq!(gesture.update(Pose::Calm, at(100)), SequenceEvent::None);
        assert_eq!(gesture.update(Pose::Offer, at(600)), SequenceEvent::Completed);
        assert!(gesture.is_complete());
    }

    #[test]
    fn test_sequence_completes_at_window_edge() {
        let mut gesture = calm_to_offer();
        gesture.update(Pose::Calm, at(0));
        assert_eq!(gesture.update(Pose::Offer, at(1000)), SequenceEvent::Completed);
    }

    #[test]
    fn test_sequence_too_late_resets() {
        let mut gesture = calm_to_offer();
        gesture.update(Pose::Calm, at(0));
        gesture.update(Pose::Unknown, at(500));
        assert_eq!(gesture.update(Pose::Offer, at(1500)), SequenceEvent::TooLate);
        assert!(!gesture.is_complete());
        assert_eq!(gesture.state(), SequenceState::Idle);
    }

    #[test]
    fn test_sequence_survives_transient_poses() {
        let mut gesture = calm_to_offer();
        gesture.update(Pose::Calm, at(0));
        assert_eq!(gesture.update(Pose::Unknown, at(300)), SequenceEvent::None);
        assert_eq!(gesture.update(Pose::Null, at(500)), SequenceEvent::None);
        assert!(gesture.is_armed());
        assert_eq!(gesture.update(Pose::Offer, at(800)), SequenceEvent::Completed);
    }

    #[test]
    fn test_sequence_times_out_on_start_pose() {
        let mut gesture = calm_to_offer();
        gesture.update(Pose::Calm, at(0));
        assert_eq!(gesture.update(Pose::Calm, at(1000)), SequenceEvent::None);
        assert_eq!(gesture.update(Pose::Calm, at(1001)), SequenceEvent::TimedOut);
        assert_eq!(gesture.state(), SequenceState::Idle);

        // Still holding the start pose re-arms on the next update
        assert_eq!(gesture.update(Pose::Calm, at(1020)), SequenceEvent::Armed);
        assert_eq!(
            gesture.state(),
            SequenceState::Armed { since: at(1020) }
        );
    }

    #[test]
    fn test_sequence_latches_until_reset() {
        let mut gesture = calm_to_offer();
        gesture.update(Pose::Calm, at(0));
        gesture.update(Pose::Offer, at(200));
        assert_eq!(gesture.update(Pose::Calm, at(300)), SequenceEvent::None);
        assert_eq!(gesture.update(Pose::Offer, at(400)), SequenceEvent::None);
        assert!(gesture.is_complete());

        gesture.reset();
        assert_eq!(gesture.state(), SequenceState::Idle);
        assert_eq!(gesture.update(Pose::Offer, at(500)), SequenceEvent::None);
    }

    #[test]
    fn test_hold_warning_and_completion() {
        let mut hold = shield_hold();
        assert_eq!(hold.update(Pose::Shield, at(0)), HoldEvent::Entered);

        assert_eq!(hold.update(Pose::Shield, at(2999)), HoldEvent::None);
        assert!(!hold.is_past_warning());
        assert_eq!(hold.progress(), 0.0);

        assert_eq!(hold.update(Pose::Shield, at(3000)), HoldEvent::Warning);
        assert!(hold.is_past_warning());
        assert_eq!(hold.progress(), 0.0);

        hold.update(Pose::Shield, at(4000));
        assert!((hold.progress() - 0.5).abs() < 1e-6);
        assert!(!hold.is_completed());

        assert_eq!(hold.update(Pose::Shield, at(5000)), HoldEvent::Completed);
        assert!(hold.is_completed());
        assert_eq!(hold.progress(), 1.0);

        // Completion fires once and stays latched
        assert_eq!(hold.update(Pose::Shield, at(6000)), HoldEvent::None);
        assert!(hold.is_completed());
    }

    #[test]
    fn test_hold_release_clears_progress() {
        let mut hold = shield_hold();
        hold.update(Pose::Shield, at(0));
        hold.update(Pose::Shield, at(4000));
        assert!(hold.is_past_warning());

        assert_eq!(hold.update(Pose::Unknown, at(4100)), HoldEvent::Released);
        assert!(!hold.is_active());
        assert!(!hold.is_past_warning());
        assert_eq!(hold.progress(), 0.0);

        assert_eq!(hold.update(Pose::Shield, at(4200)), HoldEvent::Entered);
        hold.update(Pose::Shield, at(4300));
        assert_eq!(hold.progress(), 0.0);
        assert_eq!(hold.elapsed(), Duration::from_millis(100));
    }

    #[test]
    fn test_hold_reset() {
        let mut hold = shield_hold();
        hold.update(Pose::Shield, at(0));
        hold.update(Pose::Shield, at(5000));
        assert!(hold.is_completed());

        hold.reset();
        assert!(!hold.is_completed());
        assert!(!hold.is_active());
        assert_eq!(hold.update(Pose::Unknown, at(5100)), HoldEvent::None);
    }

    fn reading(pose: Pose, ms: u64) -> PoseReading {
        PoseReading {
            pose,
            confidence: 90,
            timestamp: at(ms),
        }
    }

    #[test]
    fn test_history_keeps_latest_entries() {
        let mut history: PoseHistory = PoseHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);

        for i in 0..25 {
            history.push(reading(Pose::Calm, i * 20));
        }
        assert_eq!(history.len(), 20);
        assert_eq!(history.latest(), Some(reading(Pose::Calm, 480)));
        assert_eq!(history.iter().next(), Some(&reading(Pose::Calm, 100)));
    }

    #[test]
    fn test_history_last_change() {
        let mut history: PoseHistory = PoseHistory::new();
        history.push(reading(Pose::Calm, 0));
        history.push(reading(Pose::Calm, 20));
        assert_eq!(history.last_change(), None);

        history.push(reading(Pose::Unknown, 40));
        history.push(reading(Pose::Offer, 60));
        history.push(reading(Pose::Offer, 80));
        assert_eq!(history.last_change(), Some(reading(Pose::Offer, 60)));

        history.clear();
        assert_eq!(history.len(), 0);
    }
}
