/*
 * Fire-and-forget submission of work onto the main dispatch queue. AppKit
 * objects may only be touched on the main thread, and the host calls in from
 * arbitrary threads, so every decoration change is enqueued here. Nothing is
 * returned to wait on: the task runs on a later main-loop turn.
 */

use std::ffi::c_void;

unsafe extern "C" {
    static _dispatch_main_q: c_void;
    fn dispatch_async_f(
        queue: *const c_void,
        context: *mut c_void,
        work: extern "C" fn(*mut c_void),
    );
}

type MainQueueTask = Box<dyn FnOnce() + Send + 'static>;

extern "C" fn run_task(context: *mut c_void) {
    // SAFETY: `context` was produced by `Box::into_raw` in `submit` and is consumed exactly once.
    let task = unsafe { Box::from_raw(context as *mut MainQueueTask) };
    task();
}

/// Enqueues `task` on the main queue and returns immediately.
pub(crate) fn submit(task: impl FnOnce() + Send + 'static) {
    let boxed: Box<MainQueueTask> = Box::new(Box::new(task));
    let context = Box::into_raw(boxed) as *mut c_void;
    unsafe {
        dispatch_async_f(
            &raw const _dispatch_main_q,
            context,
            run_task,
        );
    }
}
