//! [`NabHash`] as an IO sink.
//!
//! [`NabHash`]: crate::NabHash

std! {
    use crate::NabHash;
    use std::io as std_io;

    impl std_io::Write for NabHash {
        #[inline]
        fn write(&mut self, buf: &[u8]) -> std_io::Result<usize> {
            Ok(self.update(buf))
        }

        #[inline]
        fn write_all(&mut self, buf: &[u8]) -> std_io::Result<()> {
            self.update(buf);
            Ok(())
        }

        #[inline]
        fn flush(&mut self) -> std_io::Result<()> {
            Ok(())
        }
    }

    impl NabHash {
        /// Feed everything `reader` yields, until EOF, into the hasher.
        ///
        /// # Returns
        ///
        /// The number of bytes read.
        ///
        /// # Errors
        ///
        /// Any error `reader` returns other than [`Interrupted`]. Bytes read before the error
        /// have already been written into the hasher.
        ///
        /// # Example
        ///
        /// ```
        /// use nabhash::NabHash;
        ///
        /// let mut hasher = NabHash::new();
        /// let read = hasher.update_reader(&b"hello world"[..]).unwrap();
        ///
        /// assert_eq!(read, 11);
        /// assert_eq!(hasher.finalize(), nabhash::hash(b"hello world"));
        /// ```
        ///
        /// [`Interrupted`]: std_io::ErrorKind::Interrupted
        pub fn update_reader<R: std_io::Read>(&mut self, mut reader: R) -> std_io::Result<u64> {
            std_io::copy(&mut reader, self)
        }
    }
}

no_std_io! {
    use crate::NabHash;
    use embedded_io::{self as eio, ErrorType};

    impl ErrorType for NabHash {
        type Error = core::convert::Infallible;
    }

    impl eio::Write for NabHash {
        #[inline]
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            Ok(self.update(buf))
        }

        #[inline]
        fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.update(buf);
            Ok(())
        }

        #[inline]
        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }
}
