use cw_storage_plus::Item;

pub const ROUTED: Item<u64> = Item::new("routed");
