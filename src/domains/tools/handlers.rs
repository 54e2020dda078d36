//! Tool handler trait and closure adapter.
//!
//! A handler does a tool's actual work once its arguments are validated.
//! It reports failure through [`HandlerFault`]; it never builds error text
//! itself. The registry formats faults using [`ToolHandler::activity`] and
//! [`ToolHandler::subject`].

use std::future::Future;

use super::arguments::ValidatedArguments;
use super::content::ToolResult;
use super::context::InvocationContext;
use super::error::HandlerFault;

/// The unit of work behind a registered tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// What the tool is doing, phrased to follow "Error", e.g. `geocoding address`.
    fn activity(&self) -> &str {
        "running tool"
    }

    /// The input identifier quoted in fault messages.
    fn subject(&self, arguments: &ValidatedArguments) -> String {
        arguments.to_string()
    }

    /// Execute the tool with validated arguments.
    async fn call(
        &self,
        arguments: &ValidatedArguments,
        context: &InvocationContext,
    ) -> Result<ToolResult, HandlerFault>;
}

/// Adapter turning an async closure into a [`ToolHandler`].
pub struct FnHandler<F> {
    func: F,
    activity: String,
    subject_param: Option<String>,
}

/// Wrap an async closure as a handler.
///
/// The closure receives owned copies of the arguments and context.
pub fn handler_fn<F, Fut>(func: F) -> FnHandler<F>
where
    F: Fn(ValidatedArguments, InvocationContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ToolResult, HandlerFault>> + Send,
{
    FnHandler {
        func,
        activity: "running tool".to_string(),
        subject_param: None,
    }
}

impl<F> FnHandler<F> {
    /// Set the activity phrase used in fault messages.
    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = activity.into();
        self
    }

    /// Use the named parameter's value as the fault subject.
    pub fn with_subject_from(mut self, param: impl Into<String>) -> Self {
        self.subject_param = Some(param.into());
        self
    }
}

#[async_trait::async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(ValidatedArguments, InvocationContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ToolResult, HandlerFault>> + Send,
{
    fn activity(&self) -> &str {
        &self.activity
    }

    fn subject(&self, arguments: &ValidatedArguments) -> String {
        let param = match &self.subject_param {
            Some(p) => p,
            None => return arguments.to_string(),
        };
        match arguments.get(param) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    async fn call(
        &self,
        arguments: &ValidatedArguments,
        context: &InvocationContext,
    ) -> Result<ToolResult, HandlerFault> {
        (self.func)(arguments.clone(), context.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::{ParamSpec, ToolSchema};
    use serde_json::json;

    fn validated(value: serde_json::Value) -> ValidatedArguments {
        ToolSchema::new("t")
            .param(ParamSpec::string("msg").optional())
            .param(ParamSpec::number("n").optional())
            .validate("t", &value)
            .unwrap()
    }

    #[tokio::test]
    async fn test_fn_handler_calls_closure() {
        let handler = handler_fn(|args: ValidatedArguments, _ctx| async move {
            Ok(ToolResult::text(args.str("msg").unwrap_or_default().to_uppercase()))
        });
        let result = handler
            .call(&validated(json!({ "msg": "hi" })), &InvocationContext::default())
            .await
            .unwrap();
        assert_eq!(result.first_text(), "HI");
    }

    #[test]
    fn test_default_subject_is_arguments_json() {
        let handler = handler_fn(|_args, _ctx| async { Ok(ToolResult::text("ok")) });
        assert_eq!(handler.activity(), "running tool");
        assert_eq!(handler.subject(&validated(json!({ "msg": "x" }))), r#"{"msg":"x"}"#);
    }

    #[test]
    fn test_subject_from_param() {
        let handler = handler_fn(|_args, _ctx| async { Ok(ToolResult::text("ok")) })
            .with_activity("echoing message")
            .with_subject_from("msg");
        assert_eq!(handler.activity(), "echoing message");
        assert_eq!(handler.subject(&validated(json!({ "msg": "hello" }))), "hello");
        assert_eq!(handler.subject(&validated(json!({ "n": 4 }))), "");
    }
}
