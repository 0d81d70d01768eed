use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use coca_core::TickTimer;

/// Once-per-second browser timer backing a session.
///
/// Owns its closure so the callback stays alive for as long as the interval
/// can fire. The session cancels on every terminal transition; `Drop` covers
/// a widget torn down mid-round.
pub struct JsInterval {
    callback: Closure<dyn FnMut()>,
    handle: Option<i32>,
}

impl JsInterval {
    pub fn new(tick: impl FnMut() + 'static) -> Self {
        Self {
            callback: Closure::wrap(Box::new(tick) as Box<dyn FnMut()>),
            handle: None,
        }
    }
}

impl TickTimer for JsInterval {
    fn start(&mut self) {
        self.cancel();
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            self.callback.as_ref().unchecked_ref(),
            1_000,
        ) {
            Ok(id) => self.handle = Some(id),
            Err(err) => crate::utils::log(&format!("failed to schedule the timer: {:?}", err)),
        }
    }

    fn cancel(&mut self) {
        if let Some(id) = self.handle.take()
            && let Some(window) = web_sys::window()
        {
            window.clear_interval_with_handle(id);
        }
    }
}

impl Drop for JsInterval {
    fn drop(&mut self) {
        self.cancel();
    }
}
