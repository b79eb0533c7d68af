//! Console API bound to a capture sink.
//!
//! Every execution context gets its own `console` object whose methods
//! forward flattened messages to the sink handed to [`register_console`].
//! Nothing outside that context is touched, so captured output cannot leak
//! between runs.

use boa_engine::{
    Context, JsArgs, JsNativeError, JsObject, JsResult, JsString, JsValue, NativeFunction,
    js_string,
    object::ObjectInitializer,
    property::Attribute,
};
use boa_gc::{Finalize, Trace};
use common::Severity;
use std::cell::RefCell;
use std::rc::Rc;

/// Receiver for console output produced by a script.
pub trait CaptureSink {
    fn log(&mut self, message: String);
    fn error(&mut self, message: String);
    fn warn(&mut self, message: String);
    fn info(&mut self, message: String);

    /// Route a message to the method matching `severity`.
    fn capture(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Log => self.log(message),
            Severity::Error => self.error(message),
            Severity::Warn => self.warn(message),
            Severity::Info => self.info(message),
        }
    }
}

/// Sink shared between the host and the console of one execution context.
pub type SharedSink = Rc<RefCell<dyn CaptureSink>>;

/// Sink that keeps every captured line in memory, in call order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferedSink {
    lines: Vec<(Severity, String)>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(Severity, String)] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<(Severity, String)> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl CaptureSink for BufferedSink {
    fn log(&mut self, message: String) {
        self.lines.push((Severity::Log, message));
    }

    fn error(&mut self, message: String) {
        self.lines.push((Severity::Error, message));
    }

    fn warn(&mut self, message: String) {
        self.lines.push((Severity::Warn, message));
    }

    fn info(&mut self, message: String) {
        self.lines.push((Severity::Info, message));
    }
}

/// Console methods and the channel each one writes to.
///
/// `debug` and `trace` are aliases of `log`.
const CHANNELS: [(&str, Severity); 6] = [
    ("log", Severity::Log),
    ("info", Severity::Info),
    ("warn", Severity::Warn),
    ("error", Severity::Error),
    ("debug", Severity::Log),
    ("trace", Severity::Log),
];

/// Deepest object nesting a console call serializes.
///
/// `JSON.stringify` recurses on the native stack, so deeper values raise a
/// `RangeError` in the script instead.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Captures carried by each native console method.
#[derive(Clone, Trace, Finalize)]
struct ConsoleChannel {
    #[unsafe_ignore_trace]
    sink: SharedSink,
    #[unsafe_ignore_trace]
    severity: Severity,
}

/// Register a `console` object on the global object of `context`.
pub fn register_console(context: &mut Context, sink: SharedSink) -> JsResult<()> {
    let mut initializer = ObjectInitializer::new(context);
    for (name, severity) in CHANNELS {
        let channel = ConsoleChannel {
            sink: sink.clone(),
            severity,
        };
        initializer.function(
            NativeFunction::from_copy_closure_with_captures(emit, channel),
            JsString::from(name),
            0,
        );
    }
    let console = initializer.build();

    context.register_global_property(js_string!("console"), console, Attribute::all())
}

fn emit(
    _this: &JsValue,
    args: &[JsValue],
    channel: &ConsoleChannel,
    context: &mut Context,
) -> JsResult<JsValue> {
    // Formatting may run script code (toJSON, getters) that logs in turn, so
    // the sink is borrowed only once the message is complete.
    let message = format_args(args, context)?;
    let mut sink = channel
        .sink
        .try_borrow_mut()
        .map_err(|_| JsNativeError::error().with_message("console output is not available"))?;
    sink.capture(channel.severity, message);
    Ok(JsValue::undefined())
}

/// Flatten console arguments into one display string.
///
/// Objects, arrays and `null` go through `JSON.stringify(value, null, 2)`;
/// everything else is converted with `ToString`. Arguments are joined with a
/// single space. Errors raised while serializing propagate to the caller.
pub fn format_args(args: &[JsValue], context: &mut Context) -> JsResult<String> {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        parts.push(format_value(arg, context)?);
    }
    Ok(parts.join(" "))
}

fn format_value(value: &JsValue, context: &mut Context) -> JsResult<String> {
    match value {
        JsValue::Undefined => Ok("undefined".to_string()),
        JsValue::Null => Ok("null".to_string()),
        JsValue::Symbol(s) => Ok(format!(
            "Symbol({})",
            s.description().map(|d| d.to_std_string_escaped()).unwrap_or_default()
        )),
        JsValue::Object(obj) if !obj.is_callable() => {
            let json = stringify(value, context)?;
            Ok(json
                .as_string()
                .map(|s| s.to_std_string_escaped())
                .unwrap_or_default())
        }
        _ => Ok(value.to_string(context)?.to_std_string_escaped()),
    }
}

/// `JSON.stringify(value, null, 2)`, bounded by [`MAX_NESTING_DEPTH`].
fn stringify(value: &JsValue, context: &mut Context) -> JsResult<JsValue> {
    let json = context.global_object().get(js_string!("JSON"), context)?;
    let json = json
        .as_object()
        .ok_or_else(|| JsNativeError::typ().with_message("JSON is not an object"))?
        .clone();
    let function = json.get(js_string!("stringify"), context)?;
    let function = function
        .as_callable()
        .ok_or_else(|| JsNativeError::typ().with_message("JSON.stringify is not a function"))?;

    let replacer = NativeFunction::from_copy_closure_with_captures(
        track_depth,
        NestingGuard::default(),
    )
    .to_js_function(context.realm());

    let args = [value.clone(), JsValue::from(replacer), JsValue::from(2)];
    function.call(&JsValue::from(json.clone()), &args, context)
}

/// Objects on the path from the root to the value being serialized.
#[derive(Clone, Default, Trace, Finalize)]
struct NestingGuard {
    #[unsafe_ignore_trace]
    path: Rc<RefCell<Vec<JsObject>>>,
}

/// Replacer that passes values through unchanged while tracking depth.
///
/// Serialization is depth first and the replacer sees every value with its
/// holder as `this`, so the path is cut back to the holder on each call.
fn track_depth(
    this: &JsValue,
    args: &[JsValue],
    guard: &NestingGuard,
    _context: &mut Context,
) -> JsResult<JsValue> {
    let value = args.get_or_undefined(1).clone();
    let mut path = guard.path.borrow_mut();

    if let Some(holder) = this.as_object() {
        match path.iter().rposition(|o| JsObject::equals(o, holder)) {
            Some(index) => path.truncate(index + 1),
            None => {
                path.clear();
                path.push(holder.clone());
            }
        }
    }

    if path.len() > MAX_NESTING_DEPTH {
        return Err(JsNativeError::range()
            .with_message("value is nested too deeply to print")
            .into());
    }

    if let Some(object) = value.as_object() {
        path.push(object.clone());
    }
    Ok(value)
}
