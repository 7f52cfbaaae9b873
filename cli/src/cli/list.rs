use pickup_core::{PickupFilter, PickupSummary, Transport};

use super::Context;
use crate::render;

pub fn list<T: Transport>(ctx: &Context<T>, filter: &PickupFilter) -> anyhow::Result<()> {
    let result = ctx.api.list_pickups().map(|all| filter.apply(all));
    ctx.emit(result, |pickups| {
        if pickups.is_empty() {
            println!("No pickups found matching the selected filters.");
            return;
        }
        println!("{}", render::pickup_table(pickups));
        println!("{}", render::summary(&PickupSummary::of(pickups)));
    })
}
