/// This will be invoked on `panic!`.  A panic during or after boot is treated
/// like any other unhandled fault: we trap into the debugger and stay there.
/// Applications can override this by enabling the `app_panic_handler` feature.
#[cfg(all(target_os = "none", not(feature = "app_panic_handler")))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    crate::arm_m::halt()
}
