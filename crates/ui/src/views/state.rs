use dioxus::prelude::*;
use services::ServiceError;

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    SignInRequired,
    Unavailable(&'static str),
    Message(String),
}

impl ViewError {
    #[must_use]
    pub fn from_service(err: &ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized => ViewError::SignInRequired,
            ServiceError::NotConfigured(service) => ViewError::Unavailable(service),
            other => {
                let message = other.user_message(GENERIC_ERROR);
                if message == GENERIC_ERROR {
                    ViewError::Unknown
                } else {
                    ViewError::Message(message)
                }
            }
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::Unknown => GENERIC_ERROR.to_owned(),
            ViewError::SignInRequired => "Sign in to continue.".to_owned(),
            ViewError::Unavailable(service) => format!("The {service} service is not available."),
            ViewError::Message(message) => message.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
