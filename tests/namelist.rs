use hycs::{NameList, NameListError, NameListHeader};

const SETUP: &str = "&SETUP
 initd = 4,
 khmax = 9999,
 numpar = 2500,
 maxpar = 10000,
 kmixd = 0,
 ichem = 0,
/
";

#[test]
fn read_setup() {
    let mut setup = NameList::new();
    setup.read(SETUP.as_bytes()).unwrap();
    assert_eq!(setup.len(), 6);
    assert_eq!(setup.get("maxpar"), Some("10000"));
    assert_eq!(
        setup.particle_mode(),
        Some("Top-Hat horizontal puff and vertical particle distribution")
    );
}

#[test]
fn set_dust_keeps_existing_position() {
    let mut setup = NameList::new();
    setup.read(SETUP.as_bytes()).unwrap();
    setup.set_dust();

    let keys: Vec<_> = setup.entries().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec!["initd", "khmax", "numpar", "maxpar", "kmixd", "ichem", "qcycle"]
    );
    assert_eq!(setup.get("ichem"), Some("3"));
}

#[test]
fn write_and_reread_file() {
    let path = std::env::temp_dir().join(format!("hycs-setup-{}.cfg", std::process::id()));
    let mut setup = NameList::new();
    setup.read(SETUP.as_bytes()).unwrap();
    setup.write_file(&path, None).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let reread = NameList::read_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(written.starts_with("&SETUP\ninitd=4,\n"));
    assert!(written.ends_with("ichem=0,\n/\n"));
    assert_eq!(reread, setup);
}

#[test]
fn write_gem_parameters_in_order() {
    let mut gem = NameList::with_header(NameListHeader::GemParm);
    gem.set("numpar", "2500");
    gem.set("delt", "5");

    let mut out = Vec::new();
    gem.write(&mut out, Some(&["delt"])).unwrap();
    assert_eq!(std::str::from_utf8(&out).unwrap(), "&GEMPARM \ndelt=5,\n/\n");

    let err = gem.write(Vec::new(), Some(&["delt", "kmix0"])).unwrap_err();
    assert!(matches!(err, NameListError::MissingKey(_)));
    assert_eq!(err.to_string(), "no value for namelist key: kmix0");
}

#[test]
fn landuse_file_lines() {
    let lines = hycs::landuse_lines("/usr/local/hysplit");
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[3], "2 ");
    assert_eq!(lines[4], "0.2 ");
    assert_eq!(lines[5], "/usr/local/hysplit/bdyfiles/ ");
}
