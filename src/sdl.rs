use sdl2;

use crate::errors::*;

pub struct SdlSetup {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub timer_subsystem: sdl2::TimerSubsystem,
}

pub fn init() -> Result<SdlSetup> {

    let sdl_context: sdl2::Sdl = sdl2::init().map_err(Error::from)
        .chain_err(|| "failed to initialise sdl")?;
    let video_subsystem: sdl2::VideoSubsystem = sdl_context.video()
        .map_err(Error::from)
        .chain_err(|| "failed to initialise the sdl video subsystem")?;
    let timer_subsystem = sdl_context.timer()
        .map_err(Error::from)
        .chain_err(|| "failed to initialise the sdl timer subsystem")?;

    Ok(SdlSetup {
        sdl_context,
        video_subsystem,
        timer_subsystem,
    })
}
