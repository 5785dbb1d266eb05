//! Runtime adjustments queued between ticks.
//!
//! The controller owns a [`ControlQueue`] drained at the start of every tick.
//! Tasks and interrupt handlers that cannot borrow the controller send through
//! a shared [`ControlChannel`] instead; the driver loop forwards it with
//! `Gauntlet::receive_controls`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::classifier::{Pose, PoseThreshold, ScalePreset};

/// Controls queued before a tick
pub const CONTROL_QUEUE_LEN: usize = 8;

/// Runtime adjustments applied at the start of the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    /// Enable or disable idle colour fades
    SetInterpolation(bool),
    SetScalePreset(ScalePreset),
    SetThreshold(Pose, PoseThreshold),
    /// Default global brightness
    SetBrightness(u8),
    /// Leave the current mode and return to idle
    Abort,
}

/// FIFO of pending controls
///
/// N is the number of controls the queue holds
#[derive(Debug, Default)]
pub struct ControlQueue<const N: usize = CONTROL_QUEUE_LEN> {
    inner: Deque<Control, N>,
}

impl<const N: usize> ControlQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Deque::new(),
        }
    }

    /// Queue a control
    ///
    /// Returns the control if the queue is full
    pub fn push(&mut self, control: Control) -> Result<(), Control> {
        self.inner.push_back(control)
    }

    pub fn pop(&mut self) -> Option<Control> {
        self.inner.pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

/// Bounded control channel shared between tasks.
///
/// Interrupt safe via critical sections, so it can live in a `static`.
pub struct ControlChannel<const N: usize = CONTROL_QUEUE_LEN> {
    inner: Mutex<RefCell<Deque<Control, N>>>,
}

impl<const N: usize> ControlChannel<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for a producer task. Senders are `Copy` and share the queue.
    pub const fn sender(&self) -> ControlSender<'_, N> {
        ControlSender { channel: self }
    }

    /// Returns the control if the channel is full
    pub fn send(&self, control: Control) -> Result<(), Control> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().push_back(control))
    }

    pub fn receive(&self) -> Option<Control> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for ControlChannel<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct ControlSender<'a, const N: usize = CONTROL_QUEUE_LEN> {
    channel: &'a ControlChannel<N>,
}

impl<const N: usize> ControlSender<'_, N> {
    /// Returns the control if the channel is full
    pub fn send(&self, control: Control) -> Result<(), Control> {
        self.channel.send(control)
    }
}
