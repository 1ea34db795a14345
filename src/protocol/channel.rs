//! Module `channel`
//!
//! Line codec over the control connection. One call sends one command or
//! reads one reply; nothing is queued or batched.

use log::{debug, warn};
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::net::{Shutdown, TcpStream};

use crate::error::Result;
use crate::protocol::{Command, Reply};

/// The client end of an FTP control connection.
pub struct ControlChannel {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl ControlChannel {
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        let writer = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
        })
    }

    /// Writes the command followed by CRLF and flushes.
    pub fn send_command(&mut self, command: &Command) -> io::Result<()> {
        debug!("--> {}", command.log_text());
        let line = format!("{}\r\n", command);
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()
    }

    /// Reads exactly one reply line.
    ///
    /// A closed connection is a transport failure; a line that is not a
    /// reply is an illegal-reply error. Bytes that are not UTF-8 are
    /// replaced rather than rejected.
    pub fn read_reply(&mut self) -> Result<Reply> {
        let mut line = Vec::new();
        let n = self.reader.read_until(b'\n', &mut line)?;
        if n == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "FTP connection closed").into());
        }

        let reply = Reply::parse(&String::from_utf8_lossy(&line))?;
        debug!("<-- {}", reply);
        Ok(reply)
    }

    /// Sends a command and reads the reply that answers it.
    pub fn exchange(&mut self, command: &Command) -> Result<Reply> {
        self.send_command(command)?;
        self.read_reply()
    }

    /// Shuts the connection down. Errors are logged and dropped.
    pub fn close(&mut self) {
        if let Err(e) = self.writer.shutdown(Shutdown::Both) {
            if e.kind() != ErrorKind::NotConnected {
                warn!("Failed to close control connection: {}", e);
            }
        }
    }
}
