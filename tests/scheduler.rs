mod tests {
    use embassy_time::{Duration, Instant};
    use gauntlet_core::LedSink;
    use gauntlet_core::color::{self, Rgb};
    use gauntlet_core::render::{self, Frame};
    use gauntlet_core::scheduler::{Interval, elapsed_between};

    const PERIOD: Duration = Duration::from_millis(20);

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_interval_fires_on_period() {
        let mut interval = Interval::new(PERIOD);
        assert_eq!(interval.deadline(at(5)), at(5));

        assert!(interval.poll(at(0)));
        assert_eq!(interval.deadline(at(0)), at(20));
        assert!(!interval.poll(at(19)));
        assert!(interval.poll(at(20)));
        assert_eq!(interval.deadline(at(20)), at(40));
    }

    #[test]
    fn test_interval_catches_up_small_lag() {
        let mut interval = Interval::new(PERIOD);
        interval.poll(at(0));

        // Late but within two periods: stay on the existing grid
        assert!(interval.poll(at(50)));
        assert_eq!(interval.deadline(at(50)), at(40));
        assert!(interval.poll(at(50)));
        assert_eq!(interval.deadline(at(50)), at(60));
        assert!(!interval.poll(at(55)));
    }

    #[test]
    fn test_interval_drops_backlog() {
        let mut interval = Interval::new(PERIOD);
        interval.poll(at(0));

        assert!(interval.poll(at(200)));
        assert_eq!(interval.deadline(at(200)), at(220));
        assert!(!interval.poll(at(210)));
    }

    #[test]
    fn test_interval_reset() {
        let mut interval = Interval::new(PERIOD);
        interval.poll(at(0));
        interval.reset();
        assert!(interval.poll(at(3)));
        assert_eq!(interval.deadline(at(3)), at(23));
    }

    #[test]
    fn test_elapsed_between_saturates() {
        assert_eq!(elapsed_between(at(100), at(250)), Duration::from_millis(150));
        assert_eq!(elapsed_between(at(250), at(100)), Duration::from_millis(0));
    }

    /// Counts how the frame reached the strip
    #[derive(Default)]
    struct CountingSink {
        pixels: [Rgb; 12],
        brightness: u8,
        pixel_writes: usize,
        fills: usize,
        flushes: usize,
    }

    impl LedSink for CountingSink {
        fn set_pixel(&mut self, index: usize, color: Rgb) {
            self.pixels[index] = color;
            self.pixel_writes += 1;
        }

        fn set_all_pixels(&mut self, color: Rgb) {
            self.pixels = [color; 12];
            self.fills += 1;
        }

        fn set_global_brightness(&mut self, brightness: u8) {
            self.brightness = brightness;
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    #[test]
    fn test_uniform_frame_uses_fill() {
        let mut frame = Frame::<12>::new(100);
        frame.fill(color::BLUE);
        let mut sink = CountingSink::default();
        frame.present(&mut sink);

        assert_eq!(sink.fills, 1);
        assert_eq!(sink.pixel_writes, 0);
        assert_eq!(sink.flushes, 1);
        assert_eq!(sink.brightness, 100);
        assert_eq!(sink.pixels, [color::BLUE; 12]);
    }

    #[test]
    fn test_mixed_frame_writes_every_pixel() {
        let mut frame = Frame::<12>::new(100);
        render::indicators(&mut frame, color::GREEN);
        frame.set_brightness(255);
        let mut sink = CountingSink::default();
        frame.present(&mut sink);

        assert_eq!(sink.fills, 0);
        assert_eq!(sink.pixel_writes, 12);
        assert_eq!(sink.brightness, 255);
        assert_eq!(sink.pixels[6], Rgb::new(0, 204, 0));
        assert_eq!(sink.pixels[7], color::BLACK);
    }

    #[test]
    fn test_frame_brightness_restore() {
        let mut frame = Frame::<12>::new(100);
        frame.set_brightness(255);
        frame.restore_brightness();
        assert_eq!(frame.brightness(), 100);

        frame.set_default_brightness(30);
        frame.set_brightness(200);
        frame.restore_brightness();
        assert_eq!(frame.brightness(), 30);
    }

    #[test]
    fn test_frame_ignores_out_of_range() {
        let mut frame = Frame::<12>::new(100);
        frame.set_pixel(12, color::RED);
        assert_eq!(frame.pixel(12), None);
        assert_eq!(frame.pixels(), &[color::BLACK; 12]);
    }

    #[test]
    fn test_indicator_layout() {
        let indices: Vec<usize> = render::indicator_indices::<12>().collect();
        assert_eq!(indices, [0, 3, 6, 9]);
        let indices: Vec<usize> = render::indicator_indices::<2>().collect();
        assert_eq!(indices, [0, 1]);
    }

    #[test]
    fn test_warning_flash_halves() {
        assert!(render::flash_on(0));
        assert!(render::flash_on(249));
        assert!(!render::flash_on(250));
        assert!(render::flash_on(500));
    }
}
