//! Message transmitter trait

/// Sends a finished message out of the terminal
///
/// Transmission is blocking and unacknowledged: `Ok` means the stream was
/// put on the wire, not that anybody received it.
pub trait Transmitter {
    /// Error type of the underlying output lines
    type Error;

    /// Transmit `payload`; bytes after the first NUL are not sent
    fn transmit(&mut self, payload: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Transmitter + ?Sized> Transmitter for &mut T {
    type Error = T::Error;

    fn transmit(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        (**self).transmit(payload)
    }
}
