use pickup_core::Transport;

use super::Context;

/// Any HTTP answer means the server is up; only transport failures are errors.
pub fn ping<T: Transport>(ctx: &Context<T>) -> anyhow::Result<()> {
    let base_url = ctx.api.client().base_url().to_string();
    ctx.emit(ctx.api.check_connection(), |status| {
        println!("{base_url} is reachable (HTTP {status})");
    })
}
