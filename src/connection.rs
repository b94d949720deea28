use crate::error::ConnectionError;
use log::{debug, trace};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, BufReader, LineWriter, Write};
use std::net::TcpStream;
use std::str::FromStr;

/// Address of the remote checking process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 5000,
        }
    }
}

impl FromStr for ClientConfig {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConnectionError::InvalidAddress(String::from(s));
        let (host, port) = s.rsplit_once(':').ok_or_else(invalid)?;
        if host.is_empty() {
            return Err(invalid());
        }
        let port = port.parse::<u16>().map_err(|_| invalid())?;
        Ok(Self {
            host: String::from(host),
            port,
        })
    }
}

impl Display for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Blocking client exchanging newline-terminated text with a remote checking process.
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: LineWriter<TcpStream>,
    socket: TcpStream,
}

impl Client {
    pub fn start_connection(config: &ClientConfig) -> Result<Client, ConnectionError> {
        debug!("connecting to {config}");
        let socket = TcpStream::connect((config.host.as_str(), config.port))?;
        let reader = BufReader::new(socket.try_clone()?);
        let writer = LineWriter::new(socket.try_clone()?);
        Ok(Client {
            reader,
            writer,
            socket,
        })
    }

    /// Sends `line` followed by a newline and flushes immediately.
    pub fn write_string(&mut self, line: &str) -> Result<(), ConnectionError> {
        trace!("> {line}");
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Blocks until a full line was received. Returns `None` at the end of the stream.
    pub fn read_string(&mut self) -> Result<Option<String>, ConnectionError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            debug!("connection closed by peer");
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        trace!("< {line}");
        Ok(Some(line))
    }

    /// Releases the input stream, the output stream and the socket, in this order.
    pub fn stop_connection(self) -> Result<(), ConnectionError> {
        let Client {
            reader,
            mut writer,
            socket,
        } = self;
        drop(reader);
        writer.flush()?;
        drop(writer);
        drop(socket);
        debug!("connection stopped");
        Ok(())
    }
}
