use crate::dates::SlashOrder;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path};

fn slash_order_label(order: SlashOrder) -> &'static str {
    match order {
        SlashOrder::MonthFirst => "month-first",
        SlashOrder::DayFirst => "day-first",
    }
}

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings:     {}", settings_path().display());
    println!("Currency:     {}", settings.currency.as_deref().unwrap_or("(not set)"));
    println!("Parent id:    {}", settings.parent_id.as_deref().unwrap_or("(not set)"));
    println!("Fixed year:   {}", settings.fixed_year);
    println!("Slash order:  {}", slash_order_label(settings.slash_order));
    Ok(())
}

pub fn set(
    currency: Option<String>,
    parent_id: Option<String>,
    year: Option<i32>,
    slash_order: Option<SlashOrder>,
) -> Result<()> {
    let mut settings = load_settings();
    if let Some(c) = currency {
        settings.currency = Some(c.trim().to_uppercase());
    }
    if let Some(p) = parent_id {
        settings.parent_id = Some(p.trim().to_string());
    }
    if let Some(y) = year {
        settings.fixed_year = y;
    }
    if let Some(order) = slash_order {
        settings.slash_order = order;
    }
    save_settings(&settings)?;
    println!("Saved {}", settings_path().display());
    Ok(())
}
