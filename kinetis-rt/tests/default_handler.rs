//! The default handler never returns, so it gets a process of its own: the
//! thread that calls it is left spinning until the test binary exits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use kinetis_rt::arm_m::{self, exc::InitialStack};
use kinetis_rt::kl46::irq::Interrupt;
use kinetis_rt::kl46::VectorTable;

unsafe extern "C" fn reset() -> ! {
    loop {}
}

#[test]
fn unbound_interrupt_traps_once_and_stays_put() {
    let table = VectorTable::new(InitialStack::from_address(0x2000_6000),
                                 reset);
    let handler = table.interrupt_handler(Interrupt::Pit);

    let before = arm_m::breakpoint_count();
    let returned = Arc::new(AtomicBool::new(false));

    let flag = returned.clone();
    let dispatch = thread::spawn(move || {
        handler();
        flag.store(true, Ordering::SeqCst);
    });

    let deadline = Instant::now() + Duration::from_secs(5);
    while arm_m::breakpoint_count() == before {
        assert!(Instant::now() < deadline, "default handler never trapped");
        thread::sleep(Duration::from_millis(1));
    }

    // Give it every chance to misbehave.
    thread::sleep(Duration::from_millis(100));

    assert_eq!(arm_m::breakpoint_count(), before + 1);
    assert!(!returned.load(Ordering::SeqCst));
    assert!(!dispatch.is_finished());
}
