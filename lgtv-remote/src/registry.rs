//! In-memory registry of known televisions.

use lgtv_discovery::{DeviceDescriptor, DeviceInfo};
use parking_lot::RwLock;
use tracing::error;

/// Devices seen by discovery, unique by uuid, in insertion order.
///
/// A rediscovered device replaces its previous entry but keeps the pairing
/// key that entry had. Entries are never removed otherwise.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: RwLock<Vec<DeviceDescriptor>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uuid: &str) -> Option<DeviceDescriptor> {
        self.devices.read().iter().find(|d| d.uuid == uuid).cloned()
    }

    /// Insert or replace a device, carrying an existing pairing key forward.
    ///
    /// The replaced entry moves to the end. Returns the stored descriptor.
    pub fn upsert(&self, mut device: DeviceDescriptor) -> DeviceDescriptor {
        let mut devices = self.devices.write();

        if let Some(index) = devices.iter().position(|d| d.uuid == device.uuid) {
            let previous = devices.remove(index);
            device.pairing_key = previous.pairing_key;
        }

        devices.push(device.clone());
        device
    }

    /// Store the pairing key of a known device.
    ///
    /// Returns `false` and logs when `uuid` is unknown.
    pub fn set_pairing_key(&self, uuid: &str, key: &str) -> bool {
        let mut devices = self.devices.write();
        match devices.iter_mut().find(|d| d.uuid == uuid) {
            Some(device) => {
                device.pairing_key = Some(key.to_string());
                true
            }
            None => {
                error!(%uuid, "unable to save pairing key on an unknown device");
                false
            }
        }
    }

    /// Views of every device holding a non-empty pairing key
    pub fn list_paired(&self) -> Vec<DeviceInfo> {
        self.devices
            .read()
            .iter()
            .filter(|d| d.is_registered())
            .map(DeviceDescriptor::to_info)
            .collect()
    }

    pub fn list(&self) -> Vec<DeviceInfo> {
        self.devices
            .read()
            .iter()
            .map(DeviceDescriptor::to_info)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(uuid: &str, hostname: &str) -> DeviceDescriptor {
        DeviceDescriptor {
            uuid: uuid.to_string(),
            name: "OLED55".to_string(),
            friendly_name: format!("TV {}", uuid),
            device_type: "tv".to_string(),
            hostname: hostname.to_string(),
            port: 8080,
            pairing_key: None,
        }
    }

    #[test]
    fn test_get_unknown() {
        let registry = DeviceRegistry::new();
        assert!(registry.get("nope").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_upsert_replaces_and_keeps_key() {
        let registry = DeviceRegistry::new();
        registry.upsert(device("ABC-1", "10.0.0.5"));
        assert!(registry.set_pairing_key("ABC-1", "1234"));

        let stored = registry.upsert(device("ABC-1", "10.0.0.9"));

        assert_eq!(stored.pairing_key.as_deref(), Some("1234"));
        assert_eq!(registry.len(), 1);

        let current = registry.get("ABC-1").unwrap();
        assert_eq!(current.hostname, "10.0.0.9");
        assert_eq!(current.pairing_key.as_deref(), Some("1234"));
    }

    #[test]
    fn test_upsert_moves_entry_to_end() {
        let registry = DeviceRegistry::new();
        registry.upsert(device("A", "10.0.0.1"));
        registry.upsert(device("B", "10.0.0.2"));
        registry.upsert(device("A", "10.0.0.1"));

        let order: Vec<_> = registry.list().into_iter().map(|d| d.uuid).collect();
        assert_eq!(order, ["B", "A"]);
    }

    #[test]
    fn test_set_pairing_key_unknown_device() {
        let registry = DeviceRegistry::new();
        registry.upsert(device("A", "10.0.0.1"));

        assert!(!registry.set_pairing_key("B", "1234"));
        assert_eq!(registry.get("A").unwrap().pairing_key, None);
    }

    #[test]
    fn test_list_paired_skips_empty_keys() {
        let registry = DeviceRegistry::new();
        registry.upsert(device("A", "10.0.0.1"));
        registry.upsert(device("B", "10.0.0.2"));
        registry.upsert(device("C", "10.0.0.3"));
        registry.set_pairing_key("A", "1111");
        registry.set_pairing_key("B", "");

        let paired = registry.list_paired();
        assert_eq!(paired.len(), 1);
        assert_eq!(paired[0].uuid, "A");
        assert!(paired[0].registered);
    }
}
