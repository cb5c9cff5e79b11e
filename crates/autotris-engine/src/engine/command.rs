/// Primitive input accepted by a [`GameSession`](super::GameSession) from any
/// controller, human or autonomous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Command {
    #[display("move-left")]
    MoveLeft,
    #[display("move-right")]
    MoveRight,
    #[display("soft-drop")]
    SoftDrop,
    #[display("rotate")]
    Rotate,
    #[display("hard-drop")]
    HardDrop,
    #[display("pause")]
    TogglePause,
    #[display("quit")]
    Quit,
    #[display("restart")]
    Restart,
}
