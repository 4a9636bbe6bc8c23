use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use clap::Parser;
use series_labeler::transcribe::web::{run_server, ServerConfig, WebState};
use series_labeler::transcribe::PitchTranscriber;

/// Upload an audio file, get a MIDI transcription back.
#[derive(Debug, Parser)]
#[command(name = "transcribe-web", version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "TRANSCRIBE_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "TRANSCRIBE_PORT", default_value_t = 5000)]
    port: u16,

    /// Largest accepted upload, in MiB.
    #[arg(long, env = "TRANSCRIBE_MAX_UPLOAD_MB", default_value_t = 64)]
    max_upload_mb: usize,
}

/// MiB → bytes, clamped instead of overflowing.
fn upload_limit_bytes(mib: usize) -> usize {
    mib.saturating_mul(1024 * 1024)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ServerConfig {
        addr: SocketAddr::new(args.host, args.port),
        max_upload_bytes: upload_limit_bytes(args.max_upload_mb),
    };
    let state = WebState::new(Arc::new(PitchTranscriber::default()));
    run_server(state, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_limit_converts_mebibytes() {
        assert_eq!(upload_limit_bytes(64), 64 * 1024 * 1024);
    }

    #[test]
    fn huge_upload_limit_saturates() {
        assert_eq!(upload_limit_bytes(usize::MAX), usize::MAX);
        assert_eq!(upload_limit_bytes(usize::MAX / 1024), usize::MAX);
    }
}
