//! The ARMv6-M exception table, and the handler that catches everything the
//! application didn't ask for.

/// ARMv6-M interrupt and exception handlers are merely functions conforming to
/// the C ABI.
pub type Handler = extern "C" fn();

/// The reset vector is special: it must not return.  We can model this nicely
/// in Rust's type system as a diverging function.  We additionally mark the
/// reset handler as `unsafe` because it must do scary stuff, including zeroing
/// BSS.  Allowing a safe program to call it directly would be bad.
pub type ResetHandler = unsafe extern "C" fn() -> !;

/// The first word of the vector table.  The processor loads it into `sp` at
/// reset; it is data, not code, and is never called.
///
/// Remember that ARM uses a "full descending" stack, so `sp` points to the
/// most recently *used* cell of the stack.  Thus, the initial `sp` when the
/// stack is empty often points just past the end of RAM.  We model it here
/// as a `const` pointer to discourage such an invalid address from being
/// dereferenced.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct InitialStack(*const u32);

impl InitialStack {
    /// Wraps a pointer to the top of the stack, usually the address of a
    /// linker-script symbol.
    pub const fn new(top: *const u32) -> Self {
        InitialStack(top)
    }

    pub const fn from_address(address: usize) -> Self {
        InitialStack(address as *const u32)
    }

    pub fn address(self) -> usize {
        self.0 as usize
    }
}

/// An architecturally reserved vector.  The only value it can hold is zero.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Reserved(usize);

impl Reserved {
    pub const ZERO: Reserved = Reserved(0);

    pub fn word(self) -> usize {
        self.0
    }
}

/// Names the architectural exceptions that an application can bind a handler
/// to.  Discriminants are exception numbers, i.e. indices into the vector
/// table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Exception {
    Nmi = 2,
    HardFault = 3,
    SvCall = 11,
    PendSv = 14,
    SysTick = 15,
}

impl Exception {
    pub const ALL: [Exception; 5] = [
        Exception::Nmi,
        Exception::HardFault,
        Exception::SvCall,
        Exception::PendSv,
        Exception::SysTick,
    ];

    /// Index of this exception's vector.
    pub fn number(self) -> usize {
        self as usize
    }
}

/// Number of words in the architectural part of the vector table.
pub const EXCEPTION_VECTORS: usize = 16;

/// Represents an ARMv6-M exception table.  This is the common table of vectors
/// used for handling interrupts and initializing the processor on -M
/// processors.
///
/// Every bindable vector is a plain `Handler`, never `Option`: a slot nobody
/// claimed still has to go *somewhere*, and that somewhere is
/// `default_handler`.  Only the architecturally reserved words are zero, and
/// they can't be anything else.
///
/// Note that processors will typically have a *two-part* vector table: first
/// come the exception vectors (described here), immediately followed by
/// vendor-specific interrupt vectors handled through the NVIC.  The SoC layer
/// glues the two together; you will not find vendor-specific vectors here.
#[repr(C)]
pub struct ExceptionTable {
    /// Loaded into `sp` at reset.
    pub initial_stack: InitialStack,

    /// Reset vector.  At reset, the processor loads its stack pointer from
    /// `initial_stack` (above) and then enters this function using the ARM
    /// AAPCS C ABI.
    pub reset: ResetHandler,

    /// Non-Maskable Interrupt handler.
    pub nmi:          Handler,
    /// Hard Fault handler.  On ARMv6-M every fault escalates here.
    pub hard_fault:   Handler,
    pub _reserved4:   Reserved,
    pub _reserved5:   Reserved,
    pub _reserved6:   Reserved,
    pub _reserved7:   Reserved,
    pub _reserved8:   Reserved,
    pub _reserved9:   Reserved,
    pub _reserved10:  Reserved,
    /// Supervisor Call (`SVC`) handler.
    pub sv_call:      Handler,
    pub _reserved12:  Reserved,
    pub _reserved13:  Reserved,
    /// PendSV handler.
    pub pend_sv:      Handler,
    /// SysTick handler.
    pub sys_tick:     Handler,
}

/// An exception table that routes every exception to `default_handler`.
/// This can work in a system that is willing to lock up at any fault.  In
/// practice, this is used with functional struct update syntax like so:
///
/// ```ignore
/// pub static VECTORS : ExceptionTable = ExceptionTable {
///   sys_tick: my_tick_handler,
///   .. default_exception_table(stack, reset_handler)
/// };
/// ```
pub const fn default_exception_table(initial_stack: InitialStack,
                                     reset: ResetHandler) -> ExceptionTable {
    ExceptionTable {
        initial_stack,
        reset,

        nmi: default_handler,
        hard_fault: default_handler,
        _reserved4: Reserved::ZERO,
        _reserved5: Reserved::ZERO,
        _reserved6: Reserved::ZERO,
        _reserved7: Reserved::ZERO,
        _reserved8: Reserved::ZERO,
        _reserved9: Reserved::ZERO,
        _reserved10: Reserved::ZERO,
        sv_call: default_handler,
        _reserved12: Reserved::ZERO,
        _reserved13: Reserved::ZERO,
        pend_sv: default_handler,
        sys_tick: default_handler,
    }
}

impl ExceptionTable {
    /// The handler bound to `exc`.
    pub fn handler(&self, exc: Exception) -> Handler {
        match exc {
            Exception::Nmi => self.nmi,
            Exception::HardFault => self.hard_fault,
            Exception::SvCall => self.sv_call,
            Exception::PendSv => self.pend_sv,
            Exception::SysTick => self.sys_tick,
        }
    }

    /// The table as the processor sees it, one word per vector.
    pub fn words(&self) -> [usize; EXCEPTION_VECTORS] {
        [
            self.initial_stack.address(),
            self.reset as ResetHandler as usize,
            self.nmi as usize,
            self.hard_fault as Handler as usize,
            self._reserved4.word(),
            self._reserved5.word(),
            self._reserved6.word(),
            self._reserved7.word(),
            self._reserved8.word(),
            self._reserved9.word(),
            self._reserved10.word(),
            self.sv_call as usize,
            self._reserved12.word(),
            self._reserved13.word(),
            self.pend_sv as usize,
            self.sys_tick as usize,
        ]
    }
}

/// Most programs will have at least one `ExceptionTable` `static`: the one that
/// gets deposited into ROM and read at processor startup.
///
/// To support a `static` `ExceptionTable`, the type must be `Sync`.  It is
/// *almost* `Sync` out of the box.  The exception: the pointer used for the
/// `initial_stack` item, which is never dereferenced.
unsafe impl Sync for ExceptionTable {}

/// Every vector the application leaves alone lands here.
///
/// An interrupt nobody asked for means either a configuration mistake or
/// hardware doing something unexpected, and neither is fixed by carrying on.
/// We stop in the debugger and never return to the interrupted code.
pub extern "C" fn default_handler() {
    super::halt()
}
