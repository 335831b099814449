//! mozaiku CLI: upload an image to a running mozaiku-server and
//! report the pixelated result.
//!
//! The command-line stand-in for the browser form. It drives the same
//! [`UploadSession`] state machine the form would: select a file, set
//! the percentage, submit, and feed the HTTP outcome back in.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;

use mozaiku_pipeline::Dimensions;
use mozaiku_session::{
    SelectedFile, TransformationOutcome, TransformationRequest, UploadSession, UploadStatus,
};

/// File extensions the form's picker would accept, with their media types.
const ACCEPTED_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
];

/// Upload an image for pixelation.
#[derive(Parser)]
#[command(name = "mozaiku", version)]
struct Args {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    input: PathBuf,

    /// Pixelation percentage, 1 to 100.
    percentage: String,

    /// Base URL of the mozaiku server.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Where to save the downloaded pixelated image. Skipped if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Wire shape of a successful `/api/pixelate` reply.
#[derive(Debug, Deserialize)]
struct Reply {
    width: u32,
    height: u32,
    message: String,
    download: String,
}

/// Media type for a path, mirroring the picker's extension filter.
fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    ACCEPTED_TYPES
        .iter()
        .find(|(accepted, _)| accepted.eq_ignore_ascii_case(ext))
        .map(|(_, media_type)| *media_type)
}

/// Send one transformation request.
///
/// Returns the outcome for the session plus, on success, the server's
/// download path for the pixelated output (which the session itself
/// does not track).
async fn send(
    client: &reqwest::Client,
    server: &str,
    request: &TransformationRequest,
) -> (TransformationOutcome, Option<String>) {
    let part = match reqwest::multipart::Part::bytes(request.image.bytes.clone())
        .file_name(request.image.file_name.clone())
        .mime_str(&request.image.media_type)
    {
        Ok(part) => part,
        Err(e) => {
            return (
                TransformationOutcome::Failed(format!("bad media type: {e}")),
                None,
            );
        }
    };
    let form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("pixelSize", request.percentage.to_string());

    let response = match client
        .post(format!("{server}/api/pixelate"))
        .multipart(form)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            return (
                TransformationOutcome::Failed(format!("request failed: {e}")),
                None,
            );
        }
    };

    if !response.status().is_success() {
        return (
            TransformationOutcome::Failed(format!("server replied {}", response.status())),
            None,
        );
    }

    match response.json::<Reply>().await {
        Ok(reply) => {
            println!("{}", reply.message);
            (
                TransformationOutcome::Completed(Dimensions {
                    width: reply.width,
                    height: reply.height,
                }),
                Some(reply.download),
            )
        }
        Err(e) => (
            TransformationOutcome::Failed(format!("unreadable reply: {e}")),
            None,
        ),
    }
}

/// Fetch the pixelated output to a local file.
async fn download(
    client: &reqwest::Client,
    server: &str,
    download_path: &str,
    output: &Path,
) -> anyhow::Result<()> {
    let response = client
        .get(format!("{server}{download_path}"))
        .send()
        .await
        .context("download request failed")?
        .error_for_status()
        .context("download rejected")?;
    let bytes = response.bytes().await.context("reading download body")?;
    tokio::fs::write(output, &bytes)
        .await
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Saved {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let Some(media_type) = media_type_for(&args.input) else {
        bail!("unsupported file type: {}", args.input.display());
    };
    let bytes = tokio::fs::read(&args.input)
        .await
        .with_context(|| format!("reading {}", args.input.display()))?;
    let file_name = args
        .input
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());

    let mut session = UploadSession::new();
    session.set_file(SelectedFile {
        bytes,
        media_type: media_type.to_string(),
        file_name,
    });
    session.set_percentage(&args.percentage);

    let Some(request) = session.submit() else {
        for (_, message) in session.errors().iter() {
            eprintln!("{message}");
        }
        bail!("nothing submitted");
    };

    let client = reqwest::Client::new();
    let (outcome, download_path) = send(&client, &args.server, &request).await;
    session.complete(outcome);

    match session.status() {
        UploadStatus::Success { result } => {
            println!("Pixelation done! {}x{}", result.width, result.height);
        }
        UploadStatus::Error { message } => {
            eprintln!("Image upload failed... ({message})");
            bail!("upload failed");
        }
        // complete() always leaves Success or Error after an accepted submit.
        UploadStatus::Idle | UploadStatus::Uploading => {
            bail!("upload did not complete");
        }
    }

    if let (Some(output), Some(path)) = (args.output, download_path) {
        download(&client, &args.server, &path, &output).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_matches_picker_extensions() {
        assert_eq!(media_type_for(Path::new("a.png")), Some("image/png"));
        assert_eq!(media_type_for(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(media_type_for(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(media_type_for(Path::new("a.webp")), Some("image/webp"));
    }

    #[test]
    fn media_type_rejects_everything_else() {
        assert_eq!(media_type_for(Path::new("a.gif")), None);
        assert_eq!(media_type_for(Path::new("a.txt")), None);
        assert_eq!(media_type_for(Path::new("no_extension")), None);
    }
}
