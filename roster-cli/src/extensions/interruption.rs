//! Interruption handler.

#[cfg(test)]
#[path = "../../tests/unit/extensions/interruption_test.rs"]
mod interruption_test;

use roster_core::utils::{GenericResult, Quota};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A flag shared with the signal handler which can be installed only once per process.
static INTERRUPTION_FLAG: Mutex<Option<Arc<AtomicBool>>> = Mutex::new(None);

/// Creates a quota which is reached once the process receives an interruption signal. The search
/// stops gracefully and the best roster found so far is reported.
pub fn create_interruption_quota() -> GenericResult<Arc<dyn Quota + Send + Sync>> {
    let mut flag = INTERRUPTION_FLAG.lock().map_err(|err| format!("cannot set interruption handler: '{err}'"))?;

    let should_interrupt = match flag.as_ref() {
        Some(should_interrupt) => should_interrupt.clone(),
        None => {
            let should_interrupt = Arc::new(AtomicBool::new(false));

            ctrlc::set_handler({
                let should_interrupt = should_interrupt.clone();
                move || {
                    should_interrupt.store(true, Ordering::Relaxed);
                }
            })
            .map_err(|err| format!("cannot set interruption handler: '{err}'"))?;

            *flag = Some(should_interrupt.clone());
            should_interrupt
        }
    };

    Ok(Arc::new(InterruptionQuota { should_interrupt }))
}

struct InterruptionQuota {
    should_interrupt: Arc<AtomicBool>,
}

impl Quota for InterruptionQuota {
    fn is_reached(&self) -> bool {
        self.should_interrupt.load(Ordering::Relaxed)
    }
}
