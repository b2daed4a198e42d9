use e2e_tests::scenarios;

#[test]
fn test_upload_download_round_trip() {
    scenarios::upload_download_round_trip().unwrap();
}

#[test]
fn test_oversized_upload_rejected() {
    scenarios::oversized_upload_rejected().unwrap();
}

#[test]
fn test_traversal_rejected() {
    scenarios::traversal_rejected().unwrap();
}

#[test]
fn test_missing_file_not_found() {
    scenarios::missing_file_not_found().unwrap();
}

#[test]
fn test_repeated_upload_overwrites() {
    scenarios::repeated_upload_overwrites().unwrap();
}

#[test]
fn test_config_files_drive_both_sides() {
    scenarios::config_files_drive_both_sides().unwrap();
}

#[test]
fn test_missing_client_config_fails() {
    scenarios::missing_client_config_fails().unwrap();
}
