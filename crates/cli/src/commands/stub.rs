//! Local copy of the `/users` service

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;

use crate::output::print_info;

#[derive(Args, Debug)]
pub struct StubArgs {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    pub listen: String,
}

pub async fn execute(args: StubArgs) -> Result<()> {
    let listener = TcpListener::bind(&args.listen)
        .await
        .with_context(|| format!("binding {}", args.listen))?;
    print_info(&format!(
        "Serving /users on http://{} (Ctrl-C to stop)",
        listener.local_addr()?
    ));

    tokio::select! {
        result = sitecheck_api::stub::serve(listener) => result?,
        _ = tokio::signal::ctrl_c() => print_info("Stopped"),
    }
    Ok(())
}
