use comfy_table::{Table, presets::UTF8_FULL};
use itinera_trip::location::LocationRecord;

pub fn locations_table<'a>(
    locations: impl IntoIterator<Item = &'a LocationRecord>,
    in_trip: impl Fn(&LocationRecord) -> bool,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["ID", "Name", "Province", "Category", "In trip"]);

    for location in locations {
        table.add_row(vec![
            location.id.to_string(),
            location.name.clone(),
            location.province.clone(),
            location.category.clone(),
            (if in_trip(location) { "✓" } else { "" }).to_string(),
        ]);
    }

    table
}

pub fn stops_table<'a>(stops: impl IntoIterator<Item = &'a LocationRecord>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "ID", "Name", "Province"]);

    for (position, stop) in stops.into_iter().enumerate() {
        table.add_row(vec![
            (position + 1).to_string(),
            stop.id.to_string(),
            stop.name.clone(),
            stop.province.clone(),
        ]);
    }

    table
}

pub fn destinations(count: usize) -> String {
    if count == 1 {
        String::from("1 destination")
    } else {
        format!("{count} destinations")
    }
}
