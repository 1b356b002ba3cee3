use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{ImageMeta, ImageStore, ImageType, StoreError, check_group, check_name};
use crate::ppm::PixelImage;

struct Entry {
    bytes: Vec<u8>,
    image_type: ImageType,
    meta: ImageMeta,
}

#[derive(Default)]
struct Groups {
    images: BTreeMap<String, BTreeMap<String, Entry>>,
    next_seq: u64,
}

/// In-memory [`ImageStore`].
///
/// All state sits behind one `RwLock`, so an insert is visible to readers
/// only once it is complete.
#[derive(Default)]
pub struct MemoryStore {
    groups: RwLock<Groups>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Every write inserts a whole entry, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Groups> {
        self.groups.read().unwrap_or_else(|poisoned| {
            log::warn!("image store lock poisoned, continuing with recovered data");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Groups> {
        self.groups.write().unwrap_or_else(|poisoned| {
            log::warn!("image store lock poisoned, continuing with recovered data");
            poisoned.into_inner()
        })
    }

    fn lookup<'g>(groups: &'g Groups, group: &str, name: &str) -> Result<&'g Entry, StoreError> {
        groups
            .images
            .get(group)
            .and_then(|names| names.get(name))
            .ok_or_else(|| StoreError::NotFound {
                group: group.to_owned(),
                name: name.to_owned(),
            })
    }

    /// Validate and summarize `bytes` before taking the lock.
    fn prepare(bytes: &[u8], image_type: &str) -> Result<Entry, StoreError> {
        let image_type = ImageType::from_name(image_type)?;
        let image = PixelImage::parse(bytes).map_err(StoreError::BadFormat)?;
        let info = image.info();
        Ok(Entry {
            bytes: bytes.to_vec(),
            image_type,
            meta: ImageMeta {
                width: info.width,
                height: info.height,
                max_colors: info.max_color_value,
                header_bytes: info.header_len,
                creation_time: now_millis(),
            },
        })
    }
}

impl ImageStore for MemoryStore {
    fn get(&self, group: &str, name: &str, image_type: &str) -> Result<Vec<u8>, StoreError> {
        check_group(group)?;
        check_name(name)?;
        let wanted = ImageType::from_name(image_type)?;
        let groups = self.read();
        let entry = Self::lookup(&groups, group, name)?;
        if entry.image_type != wanted {
            // Only one type exists today; conversion between types is not supported.
            return Err(StoreError::BadType(image_type.to_owned()));
        }
        Ok(entry.bytes.clone())
    }

    fn list(&self, group: &str) -> Result<Vec<String>, StoreError> {
        check_group(group)?;
        Ok(self
            .read()
            .images
            .get(group)
            .map(|names| names.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn meta(&self, group: &str, name: &str) -> Result<ImageMeta, StoreError> {
        check_group(group)?;
        check_name(name)?;
        Ok(Self::lookup(&self.read(), group, name)?.meta)
    }

    fn put(&self, group: &str, bytes: &[u8], image_type: &str) -> Result<String, StoreError> {
        check_group(group)?;
        let entry = Self::prepare(bytes, image_type)?;

        let mut guard = self.write();
        let groups = &mut *guard;
        let names = groups.images.entry(group.to_owned()).or_default();
        let name = loop {
            let candidate = format!("{:016x}", groups.next_seq);
            groups.next_seq += 1;
            if !names.contains_key(&candidate) {
                break candidate;
            }
        };
        log::debug!("stored {group}/{name} ({} bytes)", entry.bytes.len());
        names.insert(name.clone(), entry);
        Ok(name)
    }

    fn put_named(
        &self,
        group: &str,
        name: &str,
        bytes: &[u8],
        image_type: &str,
    ) -> Result<(), StoreError> {
        check_group(group)?;
        check_name(name)?;
        let entry = Self::prepare(bytes, image_type)?;

        let mut groups = self.write();
        let names = groups.images.entry(group.to_owned()).or_default();
        if names.contains_key(name) {
            return Err(StoreError::Exists {
                group: group.to_owned(),
                name: name.to_owned(),
            });
        }
        log::debug!("stored {group}/{name} ({} bytes)", entry.bytes.len());
        names.insert(name.to_owned(), entry);
        Ok(())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}
