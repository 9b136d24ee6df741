use crate::scene::graph::{ConnectErr, EncodeErr, IoErr};
use crate::scene::{SceneCommand, SceneError, SceneGraph};
use snafu::ResultExt;
use std::io::{BufWriter, Write};
use std::net::{SocketAddr, TcpStream};
use tracing::{info, trace};

/// Streams scene commands to a viewer bridge as newline-delimited JSON.
///
/// Writes are buffered by whatever `W` does; [`SceneGraph::flush`] pushes them out. The mirror
/// flushes once after building and once per render.
#[derive(Debug)]
pub struct RemoteScene<W: Write> {
    writer: W,
    sent: u64,
}

pub type TcpScene = RemoteScene<BufWriter<TcpStream>>;

impl RemoteScene<BufWriter<TcpStream>> {
    pub fn connect(address: SocketAddr) -> Result<Self, SceneError> {
        let stream = TcpStream::connect(address).context(ConnectErr { address })?;
        stream.set_nodelay(true).context(IoErr)?;

        info!("Connected to viewer bridge at {address}");

        Ok(RemoteScene::new(BufWriter::new(stream)))
    }
}

impl<W: Write> RemoteScene<W> {
    pub fn new(writer: W) -> Self {
        RemoteScene { writer, sent: 0 }
    }

    /// Number of commands written so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SceneGraph for RemoteScene<W> {
    fn send(&mut self, command: SceneCommand) -> Result<(), SceneError> {
        trace!("[RemoteScene] {} {}", command.kind(), command.path());

        serde_json::to_writer(&mut self.writer, &command).with_context(|_| EncodeErr {
            kind: command.kind(),
            path: command.path().clone(),
        })?;
        self.writer.write_all(b"\n").context(IoErr)?;
        self.sent += 1;

        Ok(())
    }

    fn flush(&mut self) -> Result<(), SceneError> {
        self.writer.flush().context(IoErr)
    }
}
