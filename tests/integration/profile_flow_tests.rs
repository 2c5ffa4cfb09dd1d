//! Integration tests for profile persistence: ProfileStore → DosingService.

use crate::mock_hw::{MockEffector, MockSensor, RecordingSink};

use nfcbolus::adapters::profile_store::{MemoryStorage, ProfileStore};
use nfcbolus::app::ports::{ConfigPort, StoragePort};
use nfcbolus::app::service::DosingService;
use nfcbolus::config::DosingProfile;
use nfcbolus::error::ConfigError;

#[test]
fn first_boot_uses_default_profile() {
    let store = ProfileStore::new(MemoryStorage::new());
    let app = DosingService::from_config(&store).unwrap();
    assert_eq!(*app.profile(), DosingProfile::default());
}

#[test]
fn saved_profile_survives_service_restart() {
    let mut store = ProfileStore::new(MemoryStorage::new());
    let mut sink = RecordingSink::new();

    let mut app = DosingService::from_config(&store).unwrap();
    app.update_profile(DosingProfile::new(110.0, 25.0), &mut sink)
        .unwrap();
    app.save_profile(&mut store).unwrap();
    drop(app);

    let restarted = DosingService::from_config(&store).unwrap();
    assert_eq!(*restarted.profile(), DosingProfile::new(110.0, 25.0));

    let mut fx = MockEffector::new();
    let mut sensor = MockSensor::reading(210.0);
    let d = restarted.run_cycle(&mut sensor, &mut fx, &mut sink).unwrap();
    // (210 - 110) / 25 = 4.0
    assert_eq!(d.dose_units(), 4.0);
    assert_eq!(fx.pulses, vec![4.0]);
}

#[test]
fn corrupted_profile_blocks_service_startup() {
    let mut store = ProfileStore::new(MemoryStorage::new());
    store
        .storage_mut()
        .write("dosing", "profile", b"not a profile")
        .unwrap();

    assert_eq!(store.load(), Err(ConfigError::Corrupted));
    assert!(matches!(
        DosingService::from_config(&store),
        Err(ConfigError::Corrupted)
    ));
}
