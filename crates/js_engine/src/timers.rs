//! Timer APIs (setTimeout, setInterval, etc.)
//!
//! A run ends as soon as the script returns and its context is dropped with
//! it, so scheduled callbacks never fire. The functions exist so browser
//! style scripts do not fail on a missing global.

use boa_engine::{
    Context, JsArgs, JsNativeError, JsResult, JsValue, NativeFunction,
    js_string,
};
use boa_gc::{Finalize, Trace};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// Timer id counter, one per execution context.
#[derive(Clone, Default, Trace, Finalize)]
struct TimerIds {
    #[unsafe_ignore_trace]
    last: Rc<Cell<u32>>,
}

impl TimerIds {
    fn next(&self) -> u32 {
        let id = self.last.get() + 1;
        self.last.set(id);
        id
    }
}

/// Register timer APIs on the global object.
pub fn register_timers(context: &mut Context) -> JsResult<()> {
    let ids = TimerIds::default();

    context.register_global_builtin_callable(
        js_string!("setTimeout"),
        1,
        NativeFunction::from_copy_closure_with_captures(set_timeout, ids.clone()),
    )?;
    context.register_global_builtin_callable(
        js_string!("setInterval"),
        1,
        NativeFunction::from_copy_closure_with_captures(set_interval, ids),
    )?;
    context.register_global_builtin_callable(
        js_string!("clearTimeout"),
        1,
        NativeFunction::from_fn_ptr(clear_timer),
    )?;
    context.register_global_builtin_callable(
        js_string!("clearInterval"),
        1,
        NativeFunction::from_fn_ptr(clear_timer),
    )?;

    Ok(())
}

fn set_timeout(
    _: &JsValue,
    args: &[JsValue],
    ids: &TimerIds,
    _: &mut Context,
) -> JsResult<JsValue> {
    schedule(args, ids, "setTimeout")
}

fn set_interval(
    _: &JsValue,
    args: &[JsValue],
    ids: &TimerIds,
    _: &mut Context,
) -> JsResult<JsValue> {
    schedule(args, ids, "setInterval")
}

fn schedule(args: &[JsValue], ids: &TimerIds, api: &str) -> JsResult<JsValue> {
    if !args.get_or_undefined(0).is_callable() {
        return Err(JsNativeError::typ()
            .with_message(format!("{api}: first argument must be a function"))
            .into());
    }

    let id = ids.next();
    debug!(timer = id, api, "timer registered; callback outlives the run and is dropped");
    Ok(JsValue::from(id))
}

fn clear_timer(_: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::undefined())
}
