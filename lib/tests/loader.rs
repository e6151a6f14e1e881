use car_price::{load_listings, Error};
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_with_rows(n: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Price,Year,Mileage,City,State,Vin,Make,Model").unwrap();
    for i in 0..n {
        writeln!(
            file,
            "{},{},{},Austin,TX,VIN{:05},{},{}",
            10000 + i * 10,
            2000 + i % 20,
            1000 * i,
            i,
            if i % 2 == 0 { "Ford" } else { "Honda" },
            if i % 3 == 0 { "Focus" } else { "Civic" },
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn well_formed_file_yields_every_row() {
    let file = csv_with_rows(137);
    let data = load_listings(file.path()).unwrap();

    assert_eq!(data.len(), 137);
    let first = &data.rows()[0];
    assert_eq!(first.price, 10000.0);
    assert_eq!(first.year, 2000.0);
    assert_eq!(first.make, "Ford");
    assert_eq!(first.model, "Focus");
}

#[test]
fn reordered_columns_are_matched_by_name() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Model,Make,Mileage,Year,Price").unwrap();
    writeln!(file, "Civic,Honda,42000,2015,13500").unwrap();
    file.flush().unwrap();

    let data = load_listings(file.path()).unwrap();
    let row = &data.rows()[0];
    assert_eq!(row.price, 13500.0);
    assert_eq!(row.mileage, 42000.0);
    assert_eq!(row.model, "Civic");
}

#[test]
fn missing_required_column_is_data_format_error() {
    for missing in ["Price", "Year", "Mileage", "Make", "Model"] {
        let header: Vec<&str> = ["Price", "Year", "Mileage", "Make", "Model"]
            .into_iter()
            .filter(|c| *c != missing)
            .collect();
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", header.join(",")).unwrap();
        file.flush().unwrap();

        match load_listings(file.path()) {
            Err(Error::DataFormat(msg)) => assert!(msg.contains(missing), "{}", msg),
            other => panic!("expected DataFormat for {}, got {:?}", missing, other),
        }
    }
}

#[test]
fn non_numeric_value_is_data_format_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Price,Year,Mileage,Make,Model").unwrap();
    writeln!(file, "9000,twenty-ten,1000,Ford,Focus").unwrap();
    file.flush().unwrap();

    assert!(matches!(
        load_listings(file.path()),
        Err(Error::DataFormat(_))
    ));
}

#[test]
fn missing_path_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listings.csv");
    match load_listings(&path) {
        Err(Error::FileNotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}
