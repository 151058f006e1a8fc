//! Built-in catalog contents.
//!
//! Two configurations are shipped: the detailed table with trends and error
//! flows, and a reduced table where each identifier carries only an error
//! count. Both use the same identifiers.

use std::fmt;
use std::str::FromStr;

use analytics_protocol::{AnalyticsRecord, ErrorFlow, Impact, Trend};

use crate::storage::CatalogError;

/// Selects one of the built-in catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatalogVariant {
    /// Trend plus error flows, stack traces included
    #[default]
    Full,
    /// A single error count per identifier
    Reduced,
}

impl CatalogVariant {
    pub const ALL: [CatalogVariant; 2] = [CatalogVariant::Full, CatalogVariant::Reduced];

    pub fn name(&self) -> &'static str {
        match self {
            CatalogVariant::Full => "full",
            CatalogVariant::Reduced => "reduced",
        }
    }

    /// The literal records for this variant.
    pub fn records(&self) -> Vec<(String, AnalyticsRecord)> {
        match self {
            CatalogVariant::Full => full_records(),
            CatalogVariant::Reduced => reduced_records(),
        }
    }
}

impl fmt::Display for CatalogVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogVariant {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogVariant::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownVariant {
                name: s.to_string(),
            })
    }
}

const TIMEOUT_STACK_TRACE: &str = r#"
Traceback (most recent call last):
  File "/srv/example-fastapi-app/venv3/lib/python3.8/site-packages/opentelemetry/trace/__init__.py", line 541, in use_span
    yield span
  File "/srv/example-fastapi-app/venv3/lib/python3.8/site-packages/opentelemetry/sdk/trace/__init__.py", line 988, in start_as_current_span
    yield span_context
  File "/srv/example-fastapi-app/venv3/lib/python3.8/site-packages/opentelemetry/instrumentation/asgi/__init__.py", line 346, in __call__
    await self.app(scope, wrapped_receive, wrapped_send)
  File "/srv/example-fastapi-app/venv3/lib/python3.8/site-packages/starlette/exceptions.py", line 82, in __call__
    raise exc
  File "/srv/example-fastapi-app/venv3/lib/python3.8/site-packages/starlette/exceptions.py", line 71, in __call__
    await self.app(scope, receive, sender)
  File "/srv/example-fastapi-app/venv3/lib/python3.8/site-packages/starlette/routing.py", line 656, in __call__
    await route.handle(scope, receive, send)
  File "/srv/example-fastapi-app/venv3/lib/python3.8/site-packages/starlette/routing.py", line 259, in handle
    await self.app(scope, receive, send)
  File "/srv/example-fastapi-app/venv3/lib/python3.8/site-packages/starlette/routing.py", line 61, in app
    response = await func(request)
  File "/srv/example-fastapi-app/venv3/lib/python3.8/site-packages/fastapi/routing.py", line 226, in app
    raw_response = await run_endpoint_function(
  File "/srv/example-fastapi-app/venv3/lib/python3.8/site-packages/fastapi/routing.py", line 159, in run_endpoint_function
    return await dependant.call(**values)
  File "/srv/example-fastapi-app/main.py", line 35, in root
    user_service.all()
  File "/srv/example-fastapi-app/user_service.py", line 9, in all
    return self.user_store.get_users()
  File "/srv/example-fastapi-app/user_store.py", line 3, in get_users
    raise ValueError('invalid value')
ValueError: invalid value"#;

fn full_records() -> Vec<(String, AnalyticsRecord)> {
    let init_flows = vec![
        ErrorFlow::new(Trend::Up, "20 per day", Impact::High, "NullError")
            .with_stack_trace("stack1"),
        ErrorFlow::new(Trend::Down, "3 per day", Impact::Low, "InvalidArgumentException")
            .with_stack_trace("stack2"),
        ErrorFlow::new(Trend::Up, "7 per day", Impact::High, "TimeoutException")
            .with_stack_trace(TIMEOUT_STACK_TRACE),
    ];

    vec![
        (
            "A.__init__".to_string(),
            AnalyticsRecord::with_flows(Trend::Up, init_flows),
        ),
        (
            "A.func".to_string(),
            AnalyticsRecord::with_flows(Trend::Up, vec![ErrorFlow::default()]),
        ),
        (
            "B.func".to_string(),
            AnalyticsRecord::with_flows(Trend::Down, vec![]),
        ),
        (
            "func1".to_string(),
            AnalyticsRecord::with_flows(Trend::Up, vec![]),
        ),
        (
            "func2".to_string(),
            AnalyticsRecord::with_flows(Trend::Down, vec![]),
        ),
    ]
}

fn reduced_records() -> Vec<(String, AnalyticsRecord)> {
    [
        ("A.__init__", 30),
        ("A.func", 1),
        ("B.func", 0),
        ("func1", 15),
        ("func2", 4),
    ]
    .into_iter()
    .map(|(id, errors)| (id.to_string(), AnalyticsRecord::with_error_count(errors)))
    .collect()
}
