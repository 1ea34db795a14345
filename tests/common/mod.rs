// Scripted FTP server used by the integration tests.
//
// Each test hands the server a script that plays the server side of one
// control connection, line by line. Commands the script reads are recorded
// and returned by `finish`, and assertion failures inside the script are
// re-raised there.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use rax_ftp_client::{ClientConfig, FtpClient};

pub struct ScriptedServer {
    addr: SocketAddr,
    handle: JoinHandle<Vec<String>>,
}

impl ScriptedServer {
    pub fn start<F>(script: F) -> Self
    where
        F: FnOnce(&mut Session) + Send + 'static,
    {
        rax_ftp_client::utils::setup_logging();

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut session = Session::new(stream);
            script(&mut session);
            session.commands
        });

        Self { addr, handle }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Waits for the script to end and returns every command it read.
    pub fn finish(self) -> Vec<String> {
        match self.handle.join() {
            Ok(commands) => commands,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

pub struct Session {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    commands: Vec<String>,
}

impl Session {
    fn new(stream: TcpStream) -> Self {
        let writer = stream.try_clone().unwrap();
        Self {
            reader: BufReader::new(stream),
            writer,
            commands: Vec::new(),
        }
    }

    pub fn reply(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\r\n", line).as_bytes())
            .unwrap();
        self.writer.flush().unwrap();
    }

    /// Next command line without CRLF, or None once the client hung up.
    pub fn read_command(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let command = line.trim_end_matches(['\r', '\n']).to_string();
                self.commands.push(command.clone());
                Some(command)
            }
        }
    }

    pub fn expect(&mut self, expected: &str) {
        let command = self.read_command();
        assert_eq!(command.as_deref(), Some(expected));
    }

    pub fn expect_prefix(&mut self, prefix: &str) -> String {
        let command = self.read_command().expect("client hung up");
        assert!(
            command.starts_with(prefix),
            "expected {:?}, got {:?}",
            prefix,
            command
        );
        command
    }

    pub fn expect_hangup(&mut self) {
        assert_eq!(self.read_command(), None);
    }

    /// Binds a data listener and announces it with a 227 reply.
    pub fn enter_passive_mode(&mut self) -> TcpListener {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        self.reply(&format!(
            "227 Entering Passive Mode (127,0,0,1,{},{}).",
            port >> 8,
            port & 0xFF
        ));
        listener
    }

    /// Closes the control connection from the server side.
    pub fn hang_up(&mut self) {
        let _ = self.writer.shutdown(std::net::Shutdown::Both);
    }
}

/// Parses the address out of `PORT h1,h2,h3,h4,p1,p2`.
pub fn port_command_addr(command: &str) -> SocketAddrV4 {
    let args: Vec<u8> = command
        .trim_start_matches("PORT ")
        .split(',')
        .map(|part| part.parse().unwrap())
        .collect();
    assert_eq!(args.len(), 6, "bad PORT command {:?}", command);
    SocketAddrV4::new(
        Ipv4Addr::new(args[0], args[1], args[2], args[3]),
        (u16::from(args[4]) << 8) | u16::from(args[5]),
    )
}

/// Serves one download on an accepted or dialled data connection.
pub fn send_data(mut stream: TcpStream, data: &[u8]) {
    stream.write_all(data).unwrap();
}

/// Reads one upload to end of stream.
pub fn receive_data(mut stream: TcpStream) -> String {
    let mut received = String::new();
    stream.read_to_string(&mut received).unwrap();
    received
}

/// Greets, then accepts `USER`/`PASS` for alice.
pub fn greet_and_login(session: &mut Session) {
    session.reply("220 Welcome to RAX FTP Server");
    session.expect("USER alice");
    session.reply("331 Password required");
    session.expect("PASS secret");
    session.reply("230 Login successful");
}

pub fn logged_in_client(server: &ScriptedServer, config: ClientConfig) -> FtpClient {
    let mut client = FtpClient::new(config);
    client.connect("127.0.0.1", server.port()).unwrap();
    client.login("alice", "secret").unwrap();
    client
}

/// A local port with nothing listening on it.
pub fn closed_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
