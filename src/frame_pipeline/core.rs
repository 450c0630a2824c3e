use crate::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Init,
    Running {
        index: usize,
        limit: usize,
    },
    CleaningUp {
        processed: usize,
        failure: Option<String>,
    },
    Complete {
        frames: usize,
    },
    Failed {
        message: String,
    },
}

impl State {
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Complete { .. } | State::Failed { .. })
    }
}

#[derive(Debug)]
pub enum Event {
    Opened(Result<usize, Error>),
    FrameDone(Result<(), Error>),
    CleanupDone(Result<(), Error>),
}

#[derive(Debug)]
pub enum Effect {
    Open,
    ProcessFrame { index: usize, limit: usize },
    RecordFailure(Error),
    LogError(Error),
    Cleanup,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Init => write!(f, "INIT"),
            State::Running { index, limit } => write!(f, "RUNNING {}/{}", index, limit),
            State::CleaningUp { .. } => write!(f, "CLEANUP"),
            State::Complete { frames } => write!(f, "COMPLETE ({} frames)", frames),
            State::Failed { message } => write!(f, "FAILED ({})", message),
        }
    }
}

pub fn init() -> (State, Vec<Effect>) {
    (State::Init, vec![Effect::Open])
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        (State::Init, Event::Opened(Ok(0))) => (
            State::CleaningUp {
                processed: 0,
                failure: None,
            },
            vec![Effect::Cleanup],
        ),
        (State::Init, Event::Opened(Ok(limit))) => (
            State::Running { index: 0, limit },
            vec![Effect::ProcessFrame { index: 0, limit }],
        ),
        (State::Init, Event::Opened(Err(err))) => fail(0, err),

        (State::Running { index, limit }, Event::FrameDone(Ok(()))) => {
            let next = index + 1;
            if next < limit {
                (
                    State::Running { index: next, limit },
                    vec![Effect::ProcessFrame { index: next, limit }],
                )
            } else {
                (
                    State::CleaningUp {
                        processed: next,
                        failure: None,
                    },
                    vec![Effect::Cleanup],
                )
            }
        }
        (State::Running { index, .. }, Event::FrameDone(Err(err))) => fail(index, err),

        (State::CleaningUp { processed, failure }, Event::CleanupDone(result)) => {
            match (failure, result) {
                (None, Ok(())) => (State::Complete { frames: processed }, vec![]),
                (None, Err(err)) => (
                    State::Failed {
                        message: err.to_string(),
                    },
                    vec![Effect::RecordFailure(err)],
                ),
                (Some(message), Ok(())) => (State::Failed { message }, vec![]),
                (Some(message), Err(err)) => {
                    (State::Failed { message }, vec![Effect::LogError(err)])
                }
            }
        }

        (state, _) => (state, vec![]),
    }
}

fn fail(processed: usize, err: Error) -> (State, Vec<Effect>) {
    (
        State::CleaningUp {
            processed,
            failure: Some(err.to_string()),
        },
        vec![Effect::RecordFailure(err), Effect::Cleanup],
    )
}
