//! Writes device responses (DA, DSR/CPR, ...) back to the host.
//!
//! Response writes are best-effort: a PTY host that isn't reading fast
//! enough must never stall character processing. The retry policy mirrors
//! yaft's `tty_write`: `EINTR` is retried immediately, `EAGAIN`/
//! `EWOULDBLOCK` waits [`SLEEP_TIME`] and retries, and anything else is
//! logged and the response is dropped.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Matches yaft's `SLEEP_TIME` (30ms), the backoff between retries of a
/// write that would otherwise block.
pub const SLEEP_TIME: Duration = Duration::from_micros(30_000);

/// Write `response` to `sink`, retrying transient errors and dropping the
/// response (after logging) on anything else.
pub fn write_response(sink: &mut impl Write, response: &[u8]) {
    let mut offset = 0;
    while offset < response.len() {
        match sink.write(&response[offset..]) {
            Ok(0) => {
                tracing::warn!("terminal response write returned 0, dropping remainder");
                return;
            }
            Ok(n) => offset += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(SLEEP_TIME);
            }
            Err(err) => {
                tracing::warn!(error = %err, "dropping terminal response after write error");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_full_response_to_a_plain_sink() {
        let mut out = Vec::new();
        write_response(&mut out, b"\x1b[?6c");
        assert_eq!(out, b"\x1b[?6c");
    }

    struct FlakyOnce {
        failed: bool,
        out: Vec<u8>,
    }

    impl Write for FlakyOnce {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn retries_after_eintr() {
        let mut sink = FlakyOnce {
            failed: false,
            out: Vec::new(),
        };
        write_response(&mut sink, b"\x1b[0n");
        assert_eq!(sink.out, b"\x1b[0n");
    }

    struct AlwaysBroken;

    impl Write for AlwaysBroken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn drops_response_on_unrecoverable_error_without_panicking() {
        write_response(&mut AlwaysBroken, b"\x1b[0n");
    }
}
