use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single boolean input channel available on each simulated tick.
///
/// The channel set is fixed: five channels, mirroring the d-pad and the two
/// action buttons of a classic platformer controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlChannel {
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Crouch / enter pipes.
    Down,
    /// Run / fire modifier.
    Speed,
    /// Jump.
    Jump,
}

impl ControlChannel {
    /// Number of control channels.
    pub const LEN: usize = 5;

    /// All channels, in index order.
    pub const ALL: [Self; Self::LEN] =
        [Self::Left, Self::Right, Self::Down, Self::Speed, Self::Jump];

    /// Returns the channel's position within a [`ControlVector`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the single-letter code used by the compact serialization.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
            Self::Down => 'D',
            Self::Speed => 'S',
            Self::Jump => 'J',
        }
    }

    /// Parses a single-letter channel code.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            'D' => Some(Self::Down),
            'S' => Some(Self::Speed),
            'J' => Some(Self::Jump),
            _ => None,
        }
    }
}

impl fmt::Display for ControlChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The full set of channel states for one simulated tick.
///
/// A control vector is a fixed-size set of booleans, one per
/// [`ControlChannel`]. It is the unit both the simulator consumes tick by tick
/// and the genetic operators copy or flip; the size never changes.
///
/// # Serialization
///
/// Vectors serialize as a compact string of pressed-channel letters in index
/// order (e.g. `"RSJ"` for right + speed + jump, `""` for no input). This
/// keeps evolved sequences of a thousand ticks readable in JSON artifacts.
///
/// # Example
///
/// ```
/// use oxiplat_sim::{ControlChannel, ControlVector};
///
/// let mut vector = ControlVector::EMPTY;
/// vector.set(ControlChannel::Right, true);
/// vector.set(ControlChannel::Jump, true);
///
/// assert!(vector.get(ControlChannel::Right));
/// assert!(!vector.get(ControlChannel::Left));
/// assert_eq!(vector.pressed().count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ControlVector([bool; ControlChannel::LEN]);

impl ControlVector {
    /// The vector with no channel pressed.
    pub const EMPTY: Self = Self([false; ControlChannel::LEN]);

    /// Returns whether the given channel is pressed.
    #[must_use]
    pub const fn get(self, channel: ControlChannel) -> bool {
        self.0[channel.index()]
    }

    /// Sets the given channel to `pressed`.
    pub const fn set(&mut self, channel: ControlChannel, pressed: bool) {
        self.0[channel.index()] = pressed;
    }

    /// Inverts the given channel.
    pub const fn toggle(&mut self, channel: ControlChannel) {
        self.0[channel.index()] = !self.0[channel.index()];
    }

    /// Returns a copy of this vector with the given channel pressed.
    #[must_use]
    pub const fn with(mut self, channel: ControlChannel) -> Self {
        self.0[channel.index()] = true;
        self
    }

    /// Returns whether no channel is pressed.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.0.iter().any(|&pressed| pressed)
    }

    /// Returns an iterator over the pressed channels, in index order.
    pub fn pressed(self) -> impl Iterator<Item = ControlChannel> {
        ControlChannel::ALL
            .into_iter()
            .filter(move |channel| self.get(*channel))
    }
}

impl fmt::Display for ControlVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for channel in self.pressed() {
            write!(f, "{channel}")?;
        }
        Ok(())
    }
}

impl Serialize for ControlVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let code: String = self.pressed().map(ControlChannel::letter).collect();
        serializer.serialize_str(&code)
    }
}

impl<'de> Deserialize<'de> for ControlVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        let mut vector = Self::EMPTY;
        for letter in code.chars() {
            let channel = ControlChannel::from_letter(letter).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid control channel letter: {letter:?}"))
            })?;
            vector.set(channel, true);
        }
        Ok(vector)
    }
}
