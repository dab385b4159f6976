use crate::types::PhotoDir;
use comfy_table::Table;

pub fn print_card_dirs(dirs: &[PhotoDir]) {
    if dirs.is_empty() {
        println!("No folders found on this card.");
        return;
    }
    println!("{}", card_dir_table(dirs));
}

fn card_dir_table(dirs: &[PhotoDir]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Folder", "Created", "Location"]);

    for dir in dirs {
        table.add_row(vec![
            dir.name.clone(),
            dir.created.format("%Y-%m-%d %H:%M").to_string(),
            format!("file://{}", dir.path.display()),
        ]);
    }

    table
}
