//! Built-in disruption actions
//!
//! The registry is closed: every configured `event` name must map to one of
//! the variants of [`EventKind`], and its params are parsed into a
//! [`ChaosAction`] before the first request is served.

use std::fmt;
use std::io;
use std::str::FromStr;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::{BoxError, Service, ServiceExt};
use shared::{RuleConfig, chaos_warn};

use crate::COMPONENT;
use crate::error::{ChaosError, ChaosResult};
use crate::traits::{FailureReporter, ProcessControl};
use crate::types::{InjectedFailure, SignalName};

pub const DEFAULT_STATUS: u16 = 500;
pub const DEFAULT_DELAY_MS: u64 = 3000;
pub const DEFAULT_EXIT_CODE: i32 = 1;
pub const DEFAULT_SIGNAL: &str = "SIGHUP";

/// Names accepted in the `event` field of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    HttpStatus,
    Delay,
    Close,
    Exit,
    Kill,
    ThrowError,
    Reject,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::HttpStatus,
        EventKind::Delay,
        EventKind::Close,
        EventKind::Exit,
        EventKind::Kill,
        EventKind::ThrowError,
        EventKind::Reject,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::HttpStatus => "httpStatus",
            EventKind::Delay => "delay",
            EventKind::Close => "close",
            EventKind::Exit => "exit",
            EventKind::Kill => "kill",
            EventKind::ThrowError => "throwError",
            EventKind::Reject => "reject",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ChaosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "httpStatus" | "statusOverride" => Ok(EventKind::HttpStatus),
            "delay" => Ok(EventKind::Delay),
            "close" | "abort" => Ok(EventKind::Close),
            "exit" | "terminateProcess" => Ok(EventKind::Exit),
            "kill" | "signalProcess" => Ok(EventKind::Kill),
            "throwError" | "raiseSynchronous" => Ok(EventKind::ThrowError),
            "reject" | "raiseAsynchronous" => Ok(EventKind::Reject),
            _ => Err(ChaosError::UnknownEvent {
                event: s.to_string(),
            }),
        }
    }
}

/// A ready-to-run disruption
#[derive(Debug, Clone, PartialEq)]
pub enum ChaosAction {
    /// Respond with this status and an empty body
    StatusOverride(StatusCode),
    /// Hold the request, then let it through
    Delay(Duration),
    /// Tear down the connection without a valid response
    Abort,
    /// Exit the process with this code
    TerminateProcess(i32),
    /// Send this signal to the process, then let the request through
    SignalProcess(SignalName),
    /// Fail the request on its own error path
    RaiseSynchronous(InjectedFailure),
    /// Report a failure out of band, then let the request through
    RaiseAsynchronous(InjectedFailure),
}

impl ChaosAction {
    /// Build an action from a configured rule, applying defaults
    pub fn from_rule(rule: &RuleConfig) -> ChaosResult<Self> {
        let kind: EventKind = rule.event.parse()?;
        let event = rule.event.as_str();
        let param = rule.first_param();

        let action = match kind {
            EventKind::HttpStatus => ChaosAction::StatusOverride(parse_status(event, param)?),
            EventKind::Delay => ChaosAction::Delay(parse_delay(event, param)?),
            EventKind::Close => ChaosAction::Abort,
            EventKind::Exit => ChaosAction::TerminateProcess(parse_exit_code(event, param)?),
            EventKind::Kill => ChaosAction::SignalProcess(parse_signal(event, param)?),
            EventKind::ThrowError => ChaosAction::RaiseSynchronous(InjectedFailure::from_param(event, param)?),
            EventKind::Reject => ChaosAction::RaiseAsynchronous(InjectedFailure::from_param(event, param)?),
        };

        Ok(action)
    }

    pub fn kind(&self) -> EventKind {
        match self {
            ChaosAction::StatusOverride(_) => EventKind::HttpStatus,
            ChaosAction::Delay(_) => EventKind::Delay,
            ChaosAction::Abort => EventKind::Close,
            ChaosAction::TerminateProcess(_) => EventKind::Exit,
            ChaosAction::SignalProcess(_) => EventKind::Kill,
            ChaosAction::RaiseSynchronous(_) => EventKind::ThrowError,
            ChaosAction::RaiseAsynchronous(_) => EventKind::Reject,
        }
    }

    /// Run the action against a request and its continuation
    pub(crate) async fn execute<S, B>(
        &self,
        effects: Effects<'_>,
        request: Request<B>,
        next: S,
    ) -> Result<Response, BoxError>
    where
        S: Service<Request<B>, Response = Response>,
        S::Error: Into<BoxError>,
    {
        match self {
            ChaosAction::StatusOverride(status) => Ok(status_response(*status)),
            ChaosAction::Delay(amount) => {
                tokio::time::sleep(*amount).await;
                proceed(request, next).await
            }
            ChaosAction::Abort => Ok(severed_response()),
            ChaosAction::TerminateProcess(code) => {
                effects.process_control.exit(*code);
                proceed(request, next).await
            }
            ChaosAction::SignalProcess(signal) => {
                if let Err(e) = effects.process_control.signal(signal) {
                    chaos_warn!(COMPONENT, error = %e, "⚠️ Signal delivery failed");
                }
                proceed(request, next).await
            }
            ChaosAction::RaiseSynchronous(failure) => Err(failure.clone().into()),
            ChaosAction::RaiseAsynchronous(failure) => {
                effects.failure_reporter.report(failure.clone());
                proceed(request, next).await
            }
        }
    }
}

/// Side-effect collaborators an action may use
#[derive(Clone, Copy)]
pub(crate) struct Effects<'a> {
    pub process_control: &'a dyn ProcessControl,
    pub failure_reporter: &'a dyn FailureReporter,
}

/// Invoke the continuation unmodified
pub(crate) async fn proceed<S, B>(request: Request<B>, next: S) -> Result<Response, BoxError>
where
    S: Service<Request<B>, Response = Response>,
    S::Error: Into<BoxError>,
{
    next.oneshot(request).await.map_err(Into::into)
}

fn status_response(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

/// Response whose body fails on first poll, so the server drops the connection
fn severed_response() -> Response {
    let failure = io::Error::new(io::ErrorKind::ConnectionAborted, "connection severed by chaos layer");
    let stream = futures_util::stream::iter(std::iter::once(Err::<Bytes, io::Error>(failure)));
    Response::new(Body::from_stream(stream))
}

fn parse_status(event: &str, param: Option<&Value>) -> ChaosResult<StatusCode> {
    let code = match param {
        None => DEFAULT_STATUS,
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| ChaosError::invalid_params(event, format!("invalid status code {number}")))?,
        Some(Value::String(text)) => text
            .trim()
            .parse::<u16>()
            .map_err(|_| ChaosError::invalid_params(event, format!("invalid status code {text:?}")))?,
        Some(other) => {
            return Err(ChaosError::invalid_params(event, format!("expected a status code, got {other}")));
        }
    };

    StatusCode::from_u16(code)
        .map_err(|_| ChaosError::invalid_params(event, format!("status code {code} out of range")))
}

fn parse_delay(event: &str, param: Option<&Value>) -> ChaosResult<Duration> {
    match param {
        None => Ok(Duration::from_millis(DEFAULT_DELAY_MS)),
        Some(Value::Number(number)) => {
            if let Some(millis) = number.as_u64() {
                return Ok(Duration::from_millis(millis));
            }
            number
                .as_f64()
                .and_then(|millis| Duration::try_from_secs_f64(millis / 1000.0).ok())
                .ok_or_else(|| ChaosError::invalid_params(event, format!("invalid delay {number}")))
        }
        Some(other) => Err(ChaosError::invalid_params(
            event,
            format!("expected a delay in milliseconds, got {other}"),
        )),
    }
}

fn parse_exit_code(event: &str, param: Option<&Value>) -> ChaosResult<i32> {
    match param {
        None => Ok(DEFAULT_EXIT_CODE),
        Some(value) => value
            .as_i64()
            .and_then(|code| i32::try_from(code).ok())
            .ok_or_else(|| ChaosError::invalid_params(event, format!("invalid exit code {value}"))),
    }
}

fn parse_signal(event: &str, param: Option<&Value>) -> ChaosResult<SignalName> {
    match param {
        None => SignalName::parse(DEFAULT_SIGNAL),
        Some(Value::String(name)) => SignalName::parse(name),
        Some(other) => Err(ChaosError::invalid_params(
            event,
            format!("expected a signal name, got {other}"),
        )),
    }
}
