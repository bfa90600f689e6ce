// ASPRS standard point classes (LAS specification, table 17).
pub fn class_description(code: u8) -> &'static str {
    match code {
        0 => "Created, never classified",
        1 => "Unclassified",
        2 => "Ground",
        3 => "Low Vegetation",
        4 => "Medium Vegetation",
        5 => "High Vegetation",
        6 => "Building",
        7 => "Low Point (Noise)",
        8 => "Model Key-point",
        9 => "Water",
        10 => "Rail",
        11 => "Road Surface",
        12 => "Overlap Points",
        13 => "Wire - Guard",
        14 => "Wire - Conductor",
        15 => "Transmission Tower",
        16 => "Wire-structure Connector",
        17 => "Bridge Deck",
        18 => "High Noise",
        _ => "Reserved",
    }
}
