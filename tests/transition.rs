mod tests {
    use embassy_time::{Duration, Instant};
    use gauntlet_core::{color::Rgb, transition::ValueTransition};

    #[test]
    fn test_value_transition_u8() {
        let mut transition = ValueTransition::new_u8(0);
        assert_eq!(transition.current(), 0);
        assert!(!transition.is_transitioning());
        transition.set(100, Duration::from_millis(100), Instant::from_millis(0));
        assert!(transition.is_transitioning());
        assert_eq!(transition.target(), 100);

        transition.tick(Instant::from_millis(50));
        assert_eq!(transition.current(), 50);

        transition.tick(Instant::from_millis(100));
        assert_eq!(transition.current(), 100);
        assert!(!transition.is_transitioning());
    }

    #[test]
    fn test_value_transition_rgb() {
        let mut transition = ValueTransition::new_rgb(Rgb::new(0, 0, 0));
        assert_eq!(transition.current(), Rgb::new(0, 0, 0));
        transition.set(
            Rgb::new(255, 255, 255),
            Duration::from_millis(100),
            Instant::from_millis(0),
        );
        assert!(transition.is_transitioning());

        transition.tick(Instant::from_millis(50));
        assert_eq!(transition.current(), Rgb::new(127, 127, 127));

        transition.tick(Instant::from_millis(150));
        assert_eq!(transition.current(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut transition = ValueTransition::new_u8(10);
        transition.set(200, Duration::from_millis(0), Instant::from_millis(5));
        assert_eq!(transition.current(), 200);
        assert!(!transition.is_transitioning());
    }

    #[test]
    fn test_set_from_restarts_at_source() {
        let mut transition = ValueTransition::new_u8(0);
        transition.set(200, Duration::from_millis(100), Instant::from_millis(0));
        transition.tick(Instant::from_millis(50));

        // Retarget from where the previous fade was heading
        let source = transition.target();
        transition.set_from(source, 0, Duration::from_millis(100), Instant::from_millis(50));
        assert_eq!(transition.current(), 200);

        transition.tick(Instant::from_millis(200));
        assert_eq!(transition.current(), 0);
    }

    #[test]
    fn test_snap_cancels_transition() {
        let mut transition = ValueTransition::new_u8(0);
        transition.set(255, Duration::from_millis(100), Instant::from_millis(0));
        transition.snap(42);
        transition.tick(Instant::from_millis(60));
        assert_eq!(transition.current(), 42);
        assert_eq!(transition.target(), 42);
    }
}
