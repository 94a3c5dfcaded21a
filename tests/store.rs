use camino::Utf8PathBuf;

use orgmap::domain::OrganismCode;
use orgmap::store::Store;

#[test]
fn cache_roundtrip_and_manifest() {
    let temp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().join("cache")).unwrap();
    let store = Store::new_with_root(root);
    let code: OrganismCode = "hpy".parse().unwrap();

    let path = store.table_path(&code, "feature.tab");
    assert!(Store::read_cached(&path).unwrap().is_none());

    Store::write_bytes_atomic(&path, b"NP_206803.1\tCDS\tnusB\tNC_000915.1\t123\t456\n").unwrap();
    let cached = Store::read_cached(&path).unwrap().unwrap();
    assert!(cached.starts_with("NP_206803.1"));

    store
        .record_fetch(&code, "http://rsat.example", "feature.tab")
        .unwrap();
    store
        .record_fetch(&code, "http://rsat.example", "feature.tab")
        .unwrap();
    store
        .record_fetch(&code, "http://rsat.example", "organism.tab")
        .unwrap();

    let manifest = Store::read_manifest(&store.manifest_path(&code))
        .unwrap()
        .unwrap();
    assert_eq!(manifest.organism, "hpy");
    assert_eq!(manifest.base_url, "http://rsat.example");
    assert_eq!(
        manifest.files,
        vec!["feature.tab".to_string(), "organism.tab".to_string()]
    );
    assert!(!manifest.fetched_at.is_empty());

    store.clear().unwrap();
    assert!(Store::read_cached(&path).unwrap().is_none());
}
