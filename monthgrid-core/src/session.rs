//! Dispatch entry point for a presentation layer.
//!
//! A session owns the current [`Calendar`] and the [`Reducer`]. The UI calls
//! [`CalendarSession::dispatch`] and then re-reads [`CalendarSession::state`],
//! or registers a listener that fires after each transition that changed
//! something.

use crate::action::Action;
use crate::calendar::Calendar;
use crate::clock::Clock;
use crate::error::CalendarResult;
use crate::id::IdGenerator;
use crate::reducer::Reducer;

type Listener = Box<dyn FnMut(&Calendar)>;

pub struct CalendarSession<C, G> {
    state: Calendar,
    reducer: Reducer<C, G>,
    listeners: Vec<Listener>,
}

impl<C: Clock, G: IdGenerator> CalendarSession<C, G> {
    /// Start from the reducer's initial state.
    pub fn new(reducer: Reducer<C, G>) -> CalendarResult<Self> {
        let state = reducer.initial_state()?;
        Ok(Self::with_state(reducer, state))
    }

    pub fn with_state(reducer: Reducer<C, G>, state: Calendar) -> Self {
        CalendarSession {
            state,
            reducer,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &Calendar {
        &self.state
    }

    pub fn clock(&self) -> &C {
        self.reducer.clock()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Calendar) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn dispatch(&mut self, action: Action) {
        let next = self.reducer.reduce(&self.state, action);
        if next == self.state {
            return;
        }

        self.state = next;
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }
}
