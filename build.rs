// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Outside a git checkout vergen falls back to placeholder values.
    EmitBuilder::builder()
        .git_sha(true)
        .git_describe(true, true, None)
        .emit()?;
    Ok(())
}
