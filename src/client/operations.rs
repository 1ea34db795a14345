//! Client transfer operations
//!
//! Download and upload of text files. Every transfer runs the same
//! sequence on the control channel: TYPE A, data channel negotiation,
//! RETR/STOR, the data connection itself, and finally the completion reply.
//! The completion reply is read on every path once the server has accepted
//! RETR/STOR, otherwise the next command would receive it as its answer.

use log::{debug, info};
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};

use crate::client::FtpClient;
use crate::error::handlers::log_error;
use crate::error::{DataTransferError, FtpClientError, Result};
use crate::protocol::Command;
use crate::protocol::responses::{TRANSFER_COMPLETE, is_transfer_starting};
use crate::transfer::copy_text;

impl FtpClient {
    /// Downloads the remote text file at `path` into `sink`.
    ///
    /// Returns the number of bytes received.
    pub fn download_textual_data<W>(&mut self, path: &str, sink: &mut W) -> Result<u64>
    where
        W: Write + ?Sized,
    {
        let bytes = self.transfer(Command::RETR(path.to_string()), |stream, buffer_size| {
            copy_text(stream, sink, buffer_size)
        })?;
        info!("Downloaded {} ({} bytes)", path, bytes);
        Ok(bytes)
    }

    /// Uploads text read from `source` to the remote file at `path`.
    ///
    /// Returns the number of bytes sent.
    pub fn upload_textual_data<R>(&mut self, path: &str, source: &mut R) -> Result<u64>
    where
        R: Read + ?Sized,
    {
        let bytes = self.transfer(Command::STOR(path.to_string()), |stream, buffer_size| {
            copy_text(source, stream, buffer_size)
        })?;
        info!("Uploaded {} ({} bytes)", path, bytes);
        Ok(bytes)
    }

    /// Downloads a whole remote document as a string.
    pub fn download_text(&mut self, path: &str) -> Result<String> {
        let mut buffer = Vec::new();
        self.download_textual_data(path, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            DataTransferError::InvalidText {
                offset: e.utf8_error().valid_up_to() as u64,
            }
            .into()
        })
    }

    /// Replaces a whole remote document with `text`.
    pub fn upload_text(&mut self, path: &str, text: &str) -> Result<u64> {
        self.upload_textual_data(path, &mut text.as_bytes())
    }

    fn transfer<F>(&mut self, command: Command, stream_data: F) -> Result<u64>
    where
        F: FnOnce(&mut TcpStream, usize) -> std::result::Result<u64, DataTransferError>,
    {
        self.state().require_authenticated()?;
        let buffer_size = self.config().data_transfer_buffer_size;

        let reply = self.control_mut()?.exchange(&Command::TYPE('A'))?;
        if !reply.is_success() {
            return Err(reply.into());
        }

        let channel = self.open_data_transfer_channel()?;
        let mode = channel.mode();
        let control = self.control_mut()?;

        let reply = match control.exchange(&command) {
            Ok(reply) => reply,
            Err(e) => {
                channel.dispose();
                return Err(e);
            }
        };
        if !is_transfer_starting(reply.code()) {
            channel.dispose();
            return Err(reply.into());
        }
        debug!("{} accepted, opening {} data connection", command.log_text(), mode);

        let data_result = channel.open_connection().and_then(|mut stream| {
            let result = stream_data(&mut stream, buffer_size);
            close_data_stream(stream);
            result
        });

        let completion = control.read_reply().and_then(|reply| {
            if reply.code() == TRANSFER_COMPLETE {
                Ok(reply)
            } else {
                Err(FtpClientError::Protocol(reply))
            }
        });

        match (data_result, completion) {
            (Ok(bytes), Ok(_)) => Ok(bytes),
            (Err(data_err), Ok(_)) => {
                let err = FtpClientError::from(data_err);
                debug!("{} data phase failed", command.log_text());
                log_error(&err);
                Err(err)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(data_err), Err(e)) => {
                debug!("{} data phase failed before completion error", command.log_text());
                log_error(&FtpClientError::from(data_err));
                Err(e)
            }
        }
    }
}

/// Closes the data connection, marking end of data for uploads.
fn close_data_stream(stream: TcpStream) {
    if let Err(e) = stream.shutdown(Shutdown::Both) {
        debug!("Data connection already closed: {}", e);
    }
}
