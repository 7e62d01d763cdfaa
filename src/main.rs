//! serial-cmdb demo firmware
//!
//! Feeds the console from UART0 on ESP-IDF targets, or from stdin on a host.
//! The table registers a `Test` subsystem with one `Int %i` command next to
//! all built-ins.

use core::fmt::Write;
use std::time::Duration;

use serial_cmdb::console::commands::{BOLD, BOOT, CLS, ECHO, HELP, IDLE, MACRO, MACROS, RUN};
use serial_cmdb::{
    ByteSource, Category, CommandDescriptor, CommandId, CommandTable, Console, Invocation,
};

const CID_TEST: CommandId = CommandId(1);
const CID_INT: CommandId = CommandId(2);

static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor::new("Test", Category::Subsystem, CID_TEST, "", "* Test Subsystem", ""),
    CommandDescriptor::new("Int", Category::Member(0), CID_INT, "%i", "* Int as parameter", "dummy"),
    BOOT,
    ECHO,
    BOLD,
    CLS,
    MACRO,
    RUN,
    MACROS,
    IDLE,
    HELP,
];

/// Idle time between polls when there is nothing to do
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Sample user command dispatcher
fn my_dispatcher(cmd: &Invocation<'_>, out: &mut dyn Write) {
    let _ = write!(out, "my_dispatcher: cid={}\r\n", cmd.id);

    if cmd.id == CID_INT {
        let _ = write!(out, "my_dispatcher: parm 0={}\r\n", cmd.params.int_at(0).unwrap_or(0));
    }
}

/// Host loop: poll input, play macros, honour reboot requests.
fn run(input: &mut dyn ByteSource, out: &mut dyn Write, restart: &mut dyn FnMut()) {
    let table = match CommandTable::new(COMMANDS) {
        Ok(table) => table,
        Err(e) => {
            log::error!("command table rejected: {}", e);
            return;
        }
    };

    let mut console = Console::new(table);
    let mut dispatcher = my_dispatcher;
    console.print_banner(out);

    loop {
        if console.poll(input, out, &mut dispatcher) {
            log::debug!("line processed");
        }

        if console.take_reboot_request() {
            let _ = out.write_str("Rebooting...\r\n");
            restart();
        }

        if !input.has_next() && !console.macro_has_next() {
            if input.is_closed() {
                return;
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

#[cfg(target_os = "espidf")]
mod platform {
    use esp_idf_svc::hal::delay::NON_BLOCK;
    use esp_idf_svc::hal::gpio;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::{config::Config, UartDriver};
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys::EspError;

    use serial_cmdb::ByteSource;

    /// UART configuration for the console.
    pub struct UartConfig {
        pub baud_rate: u32,
    }

    impl Default for UartConfig {
        fn default() -> Self {
            Self { baud_rate: 115200 }
        }
    }

    /// Receive half of the console UART.
    struct UartIn<'a, 'd> {
        driver: &'a UartDriver<'d>,
        peeked: Option<u8>,
    }

    impl ByteSource for UartIn<'_, '_> {
        fn has_next(&mut self) -> bool {
            if self.peeked.is_none() {
                let mut buf = [0u8; 1];
                if let Ok(1) = self.driver.read(&mut buf, NON_BLOCK) {
                    self.peeked = Some(buf[0]);
                }
            }
            self.peeked.is_some()
        }

        fn next_byte(&mut self) -> Option<u8> {
            if self.has_next() {
                self.peeked.take()
            } else {
                None
            }
        }
    }

    /// Transmit half of the console UART.
    struct UartOut<'a, 'd>(&'a UartDriver<'d>);

    impl core::fmt::Write for UartOut<'_, '_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let mut bytes = s.as_bytes();
            while !bytes.is_empty() {
                let n = self.0.write(bytes).map_err(|_| core::fmt::Error)?;
                bytes = &bytes[n..];
            }
            Ok(())
        }
    }

    pub fn main() -> Result<(), EspError> {
        // Initialize ESP-IDF
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();

        let config = UartConfig::default();
        let peripherals = Peripherals::take()?;
        let driver = UartDriver::new(
            peripherals.uart0,
            peripherals.pins.gpio43,
            peripherals.pins.gpio44,
            Option::<gpio::AnyIOPin>::None,
            Option::<gpio::AnyIOPin>::None,
            &Config::new().baudrate(Hertz(config.baud_rate)),
        )?;

        let mut input = UartIn { driver: &driver, peeked: None };
        let mut out = UartOut(&driver);
        super::run(&mut input, &mut out, &mut || esp_idf_svc::hal::reset::restart());
        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
mod platform {
    use std::io::{Read, Write as _};
    use std::sync::mpsc::{self, Receiver, TryRecvError};

    use serial_cmdb::ByteSource;

    /// Stdin read on a helper thread so polling never blocks.
    struct Stdin {
        rx: Receiver<u8>,
        peeked: Option<u8>,
        closed: bool,
    }

    impl Stdin {
        fn spawn() -> Self {
            let (tx, rx) = mpsc::channel();
            std::thread::spawn(move || {
                for byte in std::io::stdin().lock().bytes() {
                    let byte = match byte {
                        // A terminal sends LF on Enter, the console wants CR.
                        Ok(b'\n') => b'\r',
                        Ok(b) => b,
                        Err(e) => {
                            log::error!("stdin: {}", e);
                            break;
                        }
                    };
                    if tx.send(byte).is_err() {
                        break;
                    }
                }
            });
            Self { rx, peeked: None, closed: false }
        }
    }

    impl ByteSource for Stdin {
        fn has_next(&mut self) -> bool {
            if self.peeked.is_none() && !self.closed {
                match self.rx.try_recv() {
                    Ok(b) => self.peeked = Some(b),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => self.closed = true,
                }
            }
            self.peeked.is_some()
        }

        fn next_byte(&mut self) -> Option<u8> {
            if self.has_next() {
                self.peeked.take()
            } else {
                None
            }
        }

        fn is_closed(&self) -> bool {
            self.closed && self.peeked.is_none()
        }
    }

    struct Stdout;

    impl core::fmt::Write for Stdout {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let mut out = std::io::stdout().lock();
            out.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)?;
            out.flush().map_err(|_| core::fmt::Error)
        }
    }

    pub fn main() -> Result<(), std::io::Error> {
        env_logger::init();

        let mut input = Stdin::spawn();
        super::run(&mut input, &mut Stdout, &mut || std::process::exit(0));
        Ok(())
    }
}

fn main() {
    if let Err(e) = platform::main() {
        log::error!("console stopped: {:?}", e);
    }
}
