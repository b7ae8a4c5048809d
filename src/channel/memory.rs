use std::{cell::RefCell, rc::Rc, sync::mpsc::Sender};

use super::{error::ChannelError, transport::Transport, wire::Frame};

/// In-process transport for tests: frames are delivered and inspected
/// through a [`MemoryHandle`].
pub struct MemoryTransport {
    state: Rc<RefCell<MemoryState>>,
}

#[derive(Clone)]
pub struct MemoryHandle {
    state: Rc<RefCell<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    inbound: Option<Sender<Frame>>,
    sent: Vec<Frame>,
    open_count: usize,
    closed: bool,
}

impl MemoryTransport {
    pub fn new() -> (Self, MemoryHandle) {
        let state = Rc::new(RefCell::new(MemoryState::default()));
        (
            Self {
                state: Rc::clone(&state),
            },
            MemoryHandle { state },
        )
    }
}

impl Transport for MemoryTransport {
    fn open(&mut self, inbound: Sender<Frame>) -> Result<(), ChannelError> {
        let mut state = self.state.borrow_mut();
        state.inbound = Some(inbound);
        state.open_count += 1;
        state.closed = false;
        Ok(())
    }

    fn send(&mut self, frame: Frame) -> Result<(), ChannelError> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Err(ChannelError::Closed);
        }
        state.sent.push(frame);
        Ok(())
    }

    fn close(&mut self) {
        let mut state = self.state.borrow_mut();
        state.inbound = None;
        state.closed = true;
    }
}

impl MemoryHandle {
    /// Pushes a frame as if the server had sent it. Ignored when not open.
    pub fn deliver(&self, frame: Frame) {
        if let Some(inbound) = &self.state.borrow().inbound {
            let _ = inbound.send(frame);
        }
    }

    pub fn sent(&self) -> Vec<Frame> {
        self.state.borrow().sent.clone()
    }

    pub fn clear_sent(&self) {
        self.state.borrow_mut().sent.clear();
    }

    pub fn open_count(&self) -> usize {
        self.state.borrow().open_count
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }
}
