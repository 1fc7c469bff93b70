//! The wire side of retrieval: list the fixed remote directory, pull one
//! file as bytes.

use crate::retrieval::error::RetrievalError;
use log::info;
use suppaftp::types::FileType;
use suppaftp::FtpStream;

pub(crate) const REMOTE_HOST: &str = "podaac-ftp.jpl.nasa.gov";
pub(crate) const REMOTE_PORT: u16 = 21;
pub(crate) const REMOTE_DIR: &str = "allData/tellus/L3/gldas_monthly/netcdf/";

/// Minimal view of the remote endpoint, so selection and storage logic can
/// run against a scripted listing.
pub(crate) trait RemoteStore {
    /// Names of the entries in the remote directory.
    fn list(&mut self) -> Result<Vec<String>, RetrievalError>;

    /// Downloads `name` fully into memory via a binary transfer.
    fn retrieve(&mut self, name: &str) -> Result<Vec<u8>, RetrievalError>;
}

/// Anonymous FTP session pinned to the GLDAS monthly directory.
pub(crate) struct FtpStore {
    stream: FtpStream,
}

impl FtpStore {
    pub(crate) fn connect() -> Result<Self, RetrievalError> {
        let mut stream = FtpStream::connect((REMOTE_HOST, REMOTE_PORT)).map_err(ftp_error)?;
        stream.login("anonymous", "anonymous").map_err(ftp_error)?;
        stream.cwd(REMOTE_DIR).map_err(ftp_error)?;
        info!("Connected to ftp://{}/{}", REMOTE_HOST, REMOTE_DIR);
        Ok(Self { stream })
    }
}

impl RemoteStore for FtpStore {
    fn list(&mut self) -> Result<Vec<String>, RetrievalError> {
        self.stream.nlst(None).map_err(ftp_error)
    }

    fn retrieve(&mut self, name: &str) -> Result<Vec<u8>, RetrievalError> {
        self.stream
            .transfer_type(FileType::Binary)
            .map_err(ftp_error)?;
        let buffer = self.stream.retr_as_buffer(name).map_err(ftp_error)?;
        Ok(buffer.into_inner())
    }
}

impl Drop for FtpStore {
    fn drop(&mut self) {
        // Best effort; the server drops the session either way.
        let _ = self.stream.quit();
    }
}

fn ftp_error(source: suppaftp::FtpError) -> RetrievalError {
    RetrievalError::Ftp {
        host: REMOTE_HOST,
        source,
    }
}
