use pickup_core::{PickupId, Transport};

use super::Context;
use crate::render;

pub fn track<T: Transport>(ctx: &Context<T>, id: &PickupId) -> anyhow::Result<()> {
    ctx.emit(ctx.api.get_pickup(id), |pickup| {
        println!("{}\n", render::pickup_details(pickup));
        println!("{}\n", render::timeline(pickup.status));
        println!("{}", render::status_hint(pickup.status));
    })
}
