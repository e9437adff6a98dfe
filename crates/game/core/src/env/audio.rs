/// Sound effect playback collaborator.
pub trait Audio {
    fn play_sfx(&mut self, sfx: &str);
}
