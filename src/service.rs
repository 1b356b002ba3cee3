//! Steganography service over an [`ImageStore`].
//!
//! This is the transport-free half of the `POST /steg/{group}/{name}` and
//! `GET /steg/{group}/{name}` handlers: it loads the cover, runs the codec,
//! stores the result, and classifies every failure into a status code and a
//! `{code, message}` body.

use crate::decode::DecodeRequest;
use crate::error::{ErrorKind, StegError};
use crate::limits::Limits;
use crate::steg::Steg;
use crate::store::{ImageStore, ImageType, StoreError};
use enough::Unstoppable;

const OK: u16 = 200;
const CREATED: u16 = 201;
const BAD_REQUEST: u16 = 400;
const NOT_FOUND: u16 = 404;
const CONFLICT: u16 = 409;
const SERVER_ERROR: u16 = 500;

/// Errors from [`StegService`], with HTTP-style classification.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Steg(#[from] StegError),

    #[error("field(s) {0} not specified")]
    Missing(String),
}

impl ServiceError {
    /// Domain error code, e.g. `"NOT_FOUND"` or `"STEG_MSG"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.code(),
            Self::Steg(e) => e.code(),
            Self::Missing(_) => "MISSING",
        }
    }

    /// HTTP status an API front end should answer with.
    pub fn status(&self) -> u16 {
        match self {
            Self::Store(StoreError::NotFound { .. }) => NOT_FOUND,
            Self::Store(StoreError::Exists { .. }) => CONFLICT,
            Self::Store(_) | Self::Missing(_) => BAD_REQUEST,
            Self::Steg(e) => match e.kind() {
                ErrorKind::AlreadyHidden => CONFLICT,
                ErrorKind::Cancelled => SERVER_ERROR,
                _ => BAD_REQUEST,
            },
        }
    }

    /// JSON-ready `{code, message}` body.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Error response body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// A newly stored image with a hidden message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Created {
    pub group: String,
    pub name: String,
    /// URL path at which the message can be unhidden.
    pub location: String,
}

impl Created {
    pub fn status(&self) -> u16 {
        CREATED
    }
}

/// A recovered message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Revealed {
    pub msg: String,
}

impl Revealed {
    pub fn status(&self) -> u16 {
        OK
    }
}

/// Hide and unhide messages in images held by a store.
///
/// ```
/// use zensteg::service::StegService;
/// use zensteg::store::{ImageStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// let mut cover = b"P6\n10 10\n255\n".to_vec();
/// cover.resize(cover.len() + 300, 0x42);
/// store.put_named("inputs", "cover", &cover, "ppm").unwrap();
///
/// let service = StegService::new(store).with_base("/api");
/// let created = service.hide("inputs", "cover", "hi", "outputs").unwrap();
/// assert!(created.location.starts_with("/api/steg/outputs/"));
/// assert_eq!(service.unhide("outputs", &created.name).unwrap().msg, "hi");
/// ```
pub struct StegService<S> {
    store: S,
    base: String,
    limits: Limits,
}

impl<S: ImageStore> StegService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            base: String::new(),
            limits: Limits::default(),
        }
    }

    /// URL prefix for returned locations, e.g. `"/api"`.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into().trim_end_matches('/').to_owned();
        self
    }

    /// Limits applied when parsing stored images.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hide `msg` in `group/name` and store the result under `out_group`.
    pub fn hide(
        &self,
        group: &str,
        name: &str,
        msg: &str,
        out_group: &str,
    ) -> Result<Created, ServiceError> {
        if out_group.is_empty() {
            return Err(self.fail(group, name, ServiceError::Missing("outGroup".to_owned())));
        }
        self.try_hide(group, name, msg, out_group)
            .map_err(|e| self.fail(group, name, e))
    }

    /// Recover the message hidden in `group/name`.
    pub fn unhide(&self, group: &str, name: &str) -> Result<Revealed, ServiceError> {
        self.try_unhide(group, name)
            .map_err(|e| self.fail(group, name, e))
    }

    fn try_hide(
        &self,
        group: &str,
        name: &str,
        msg: &str,
        out_group: &str,
    ) -> Result<Created, ServiceError> {
        let image_type = ImageType::Ppm.name();
        let bytes = self.store.get(group, name, image_type)?;
        let cover = DecodeRequest::new(&bytes)
            .with_limits(&self.limits)
            .decode(Unstoppable)?;

        let id = format!("{group}/{name}");
        let hidden = Steg::new(&cover).with_id(&id).hide(msg.as_bytes())?;

        let out_name = self.store.put(out_group, &hidden.serialize(), image_type)?;
        log::debug!("hid {} bytes from {id} in {out_group}/{out_name}", msg.len());
        Ok(Created {
            location: format!("{}/steg/{out_group}/{out_name}", self.base),
            group: out_group.to_owned(),
            name: out_name,
        })
    }

    fn try_unhide(&self, group: &str, name: &str) -> Result<Revealed, ServiceError> {
        let bytes = self.store.get(group, name, ImageType::Ppm.name())?;
        let image = DecodeRequest::new(&bytes)
            .with_limits(&self.limits)
            .decode(Unstoppable)?;

        let id = format!("{group}/{name}");
        let msg = Steg::new(&image).with_id(&id).unhide_text()?;
        log::debug!("unhid {} bytes from {id}", msg.len());
        Ok(Revealed { msg })
    }

    fn fail(&self, group: &str, name: &str, err: ServiceError) -> ServiceError {
        log::warn!(
            "steg {group}/{name}: {} -> {} ({err})",
            err.code(),
            err.status()
        );
        err
    }
}
