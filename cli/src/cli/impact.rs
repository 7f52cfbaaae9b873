use pickup_core::Transport;

use super::Context;
use crate::render;

pub fn impact<T: Transport>(ctx: &Context<T>) -> anyhow::Result<()> {
    ctx.emit(ctx.api.environmental_impact(), |impact| {
        if impact.total_completed_pickups == 0 {
            println!("No completed pickups yet.");
        } else {
            println!("{}", render::impact_report(impact));
        }
    })
}
