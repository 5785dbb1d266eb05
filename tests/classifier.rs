mod tests {
    use embassy_time::Instant;
    use gauntlet_core::classifier::{
        ClassifierConfig, Pose, PoseReading, PoseThreshold, PositionClassifier, ScalePreset,
        ThresholdError, ThresholdTable,
    };
    use gauntlet_core::sample::{Axis, PhysicalSample, RawSample};

    fn raw(accel: [i16; 3]) -> RawSample {
        RawSample::from_accel(accel, Instant::from_millis(0))
    }

    /// Fill the smoothing window with one constant sample
    fn settle(classifier: &mut PositionClassifier, accel: [i16; 3]) -> PoseReading {
        let mut reading = PoseReading::unknown(Instant::from_millis(0));
        for _ in 0..3 {
            reading = classifier.classify(raw(accel));
        }
        reading
    }

    #[test]
    fn test_each_pose_classifies_on_its_axis() {
        // X is inverted by the default mounting correction
        let cases = [
            ([0, 0, 9000], Pose::Offer),
            ([0, 0, -9000], Pose::Calm),
            ([0, -9000, 0], Pose::Oath),
            ([0, 9000, 0], Pose::Dig),
            ([9000, 0, 0], Pose::Shield),
            ([-9000, 0, 0], Pose::Null),
        ];

        for (accel, pose) in cases {
            let mut classifier = PositionClassifier::default();
            let reading = settle(&mut classifier, accel);
            assert_eq!(reading.pose, pose, "accel {:?}", accel);
            assert!(f32::from(reading.confidence) > ClassifierConfig::DEFAULT.min_confidence);
        }
    }

    #[test]
    fn test_zero_sample_is_unknown() {
        let mut classifier = PositionClassifier::default();
        let reading = settle(&mut classifier, [0, 0, 0]);
        assert_eq!(reading.pose, Pose::Unknown);
        assert_eq!(reading.confidence, 0);
    }

    #[test]
    fn test_positive_z_example() {
        let mut classifier = PositionClassifier::default();
        let reading = classifier.classify(raw([0, 0, 9000]));

        let physical = classifier.last_physical();
        assert!((physical.accel[2] - 10.8).abs() < 1e-3);
        assert_eq!(physical.dominant_axis(), Axis::Z);
        assert_eq!(reading.pose, Pose::Offer);
        assert_eq!(reading.confidence, 100);
    }

    #[test]
    fn test_below_threshold_is_unknown() {
        let mut classifier = PositionClassifier::default();
        // 3.6 m/s² on Z does not reach the 5.0 threshold
        let reading = settle(&mut classifier, [0, 0, 3000]);
        assert_eq!(reading.pose, Pose::Unknown);
    }

    #[test]
    fn test_axis_must_dominate() {
        let mut classifier = PositionClassifier::default();
        let reading = settle(&mut classifier, [0, 8000, 9000]);
        assert_eq!(reading.pose, Pose::Offer);

        // Equal magnitudes on X and Z: neither dominates
        let reading = settle(&mut classifier, [9000, 0, 9000]);
        assert_eq!(reading.pose, Pose::Unknown);
    }

    #[test]
    fn test_dominant_axis_ties_prefer_lower_axis() {
        let sample = PhysicalSample::new([4.0, -4.0, 4.0], [0.0; 3]);
        assert_eq!(sample.dominant_axis(), Axis::X);
        let sample = PhysicalSample::new([1.0, 6.0, -6.0], [0.0; 3]);
        assert_eq!(sample.dominant_axis(), Axis::Y);
        let sample = PhysicalSample::new([1.0, 2.0, -6.5], [0.0; 3]);
        assert_eq!(sample.dominant_axis(), Axis::Z);
    }

    #[test]
    fn test_moving_average_window() {
        let mut classifier = PositionClassifier::default();
        assert_eq!(classifier.classify(raw([0, 0, 9000])).pose, Pose::Offer);

        // Mean of 9000 and 0 is 4500 -> 5.4 m/s²
        let reading = classifier.classify(raw([0, 0, 0]));
        assert_eq!(reading.pose, Pose::Offer);
        assert_eq!(reading.confidence, 72);

        // Mean 3000 -> 3.6 m/s²
        assert_eq!(classifier.classify(raw([0, 0, 0])).pose, Pose::Unknown);

        classifier.reset_window();
        assert_eq!(classifier.smoothed(), PhysicalSample::ZERO);
    }

    #[test]
    fn test_confidence_floor() {
        let config = ClassifierConfig {
            min_confidence: 80.0,
            ..ClassifierConfig::DEFAULT
        };
        let classifier: PositionClassifier = PositionClassifier::new(config);
        let timestamp = Instant::from_millis(0);

        // 5.4 / 7.5 = 72 % confidence
        let reading = classifier.evaluate(&PhysicalSample::new([0.0, 0.0, 5.4], [0.0; 3]), timestamp);
        assert_eq!(reading.pose, Pose::Unknown);
        assert_eq!(reading.confidence, 0);

        let reading = classifier.evaluate(&PhysicalSample::new([0.0, 0.0, 7.0], [0.0; 3]), timestamp);
        assert_eq!(reading.pose, Pose::Offer);
        assert_eq!(reading.confidence, 93);
    }

    #[test]
    fn test_evaluate_negative_threshold() {
        let classifier = PositionClassifier::default();
        let reading = classifier.evaluate(
            &PhysicalSample::new([1.0, -2.0, -7.0], [0.0; 3]),
            Instant::from_millis(42),
        );
        assert_eq!(reading.pose, Pose::Calm);
        assert_eq!(reading.confidence, 93);
        assert_eq!(reading.timestamp, Instant::from_millis(42));
    }

    #[test]
    fn test_scale_preset() {
        let mut classifier = PositionClassifier::default();
        assert_eq!(settle(&mut classifier, [0, 0, 8000]).pose, Pose::Offer);

        // ±2 g range: 8000 LSB is only ~4.8 m/s²
        classifier.set_scale_preset(ScalePreset::Mpu6050Range2G);
        assert_eq!(settle(&mut classifier, [0, 0, 8000]).pose, Pose::Unknown);
        assert_eq!(settle(&mut classifier, [0, 0, 9000]).pose, Pose::Offer);
        assert!((classifier.scale() - 2.0 * 9.81 / 32768.0).abs() < 1e-9);
    }

    #[test]
    fn test_without_mounting_correction() {
        let config = ClassifierConfig {
            inverted_axis: None,
            ..ClassifierConfig::DEFAULT
        };
        let mut classifier: PositionClassifier = PositionClassifier::new(config);
        assert_eq!(settle(&mut classifier, [9000, 0, 0]).pose, Pose::Null);
    }

    #[test]
    fn test_gyro_conversion() {
        let mut classifier = PositionClassifier::default();
        classifier.classify(RawSample::new([0; 3], [0, 16_384, 0], Instant::from_millis(0)));
        let gyro = classifier.last_physical().gyro;
        assert!((gyro[1] - 250.0).abs() < 1e-3);
    }

    #[test]
    fn test_set_threshold() {
        let mut classifier = PositionClassifier::default();
        classifier
            .set_threshold(Pose::Offer, PoseThreshold::new(Axis::Z, 12.0))
            .unwrap();
        assert_eq!(settle(&mut classifier, [0, 0, 9000]).pose, Pose::Unknown);

        assert_eq!(
            classifier.set_threshold(Pose::Offer, PoseThreshold::new(Axis::Z, 0.0)),
            Err(ThresholdError::Invalid)
        );
        assert_eq!(
            classifier.set_threshold(Pose::Offer, PoseThreshold::new(Axis::Z, f32::NAN)),
            Err(ThresholdError::Invalid)
        );
        assert_eq!(
            classifier.set_threshold(Pose::Unknown, PoseThreshold::new(Axis::Z, 5.0)),
            Err(ThresholdError::UnknownPose)
        );
        assert_eq!(
            classifier.threshold(Pose::Offer),
            Some(PoseThreshold::new(Axis::Z, 12.0))
        );
    }

    #[test]
    fn test_default_table() {
        let table = ThresholdTable::DEFAULT;
        assert_eq!(table.validate(), Ok(()));
        assert_eq!(table.get(Pose::Unknown), None);
        assert_eq!(table.get(Pose::Shield), Some(PoseThreshold::new(Axis::X, -5.0)));
        assert_eq!(table.iter().count(), Pose::COUNT);
    }

    #[test]
    fn test_set_thresholds_rejects_invalid_table() {
        let mut classifier = PositionClassifier::default();
        let mut entries = *ThresholdTable::DEFAULT.entries();
        entries[Pose::Dig.index()] = PoseThreshold::new(Axis::Y, 80.0);

        assert_eq!(
            classifier.set_thresholds(ThresholdTable::from_entries(entries)),
            Err(Pose::Dig)
        );
        assert_eq!(classifier.thresholds(), &ThresholdTable::DEFAULT);
    }

    #[test]
    fn test_pose_names() {
        for pose in Pose::NAMED {
            assert_eq!(Pose::from_name(pose.as_str()), Some(pose));
            assert_eq!(Pose::from_index(pose.index()), Some(pose));
        }
        assert_eq!(Pose::from_index(Pose::Unknown.index()), None);
        assert_eq!(Pose::from_name("wave"), None);
    }
}
