//! Rotating content pools: fun facts and exploration spots.
//!
//! Pools are global and immutable; which items a given user has already
//! seen lives in their session (`shown` sets keyed by [`PoolId`]).

/// Identifies a content pool within a session's shown-history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolId {
    Facts,
    ExplorationSpots,
}

impl std::fmt::Display for PoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Facts => "facts",
            Self::ExplorationSpots => "exploration_spots",
        };
        write!(f, "{s}")
    }
}

/// An ordered, fixed list of content items, indexed 0..N-1.
#[derive(Debug, Clone)]
pub struct ContentPool<T> {
    items: Vec<T>,
}

impl<T> ContentPool<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A spot worth wandering to, with a picture and a map link.
#[derive(Debug, Clone)]
pub struct ExploreSpot {
    pub description: String,
    pub image_url: String,
    pub map_url: String,
}

/// The built-in fun fact pool.
pub fn fun_facts() -> ContentPool<String> {
    ContentPool::new(
        [
            "\"Strigiformes\" is the taxonomical order of all owls!",
            "It has been hypothesized that should Coffeehouse ever stop providing caffeine, \
             the average undergraduate term paper would be three times as hard.",
            "There is no way to justify Martel's existence as a college.",
            "Frogs are members of the order \"Anura\", and on wet nights you might find a \
             bunch croaking around!",
            "Sammy the Owl has been the campus mascot since 1912, the same year the \
             Institute first opened its doors.",
            "The live oaks lining the Inner Loop are pruned so their canopies meet in a \
             continuous arch.",
            "Willy's statue in the Academic Quad once rotated 180 degrees overnight. \
             Nobody confessed.",
            "The MOB is a marching band that, on principle, refuses to march.",
            "The campus sits on just under 300 acres, and every one of them has at least \
             one squirrel with strong opinions.",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    )
}

/// The built-in exploration spot pool.
pub fn exploration_spots() -> ContentPool<ExploreSpot> {
    let spot = |description: &str, image_url: &str, map_url: &str| ExploreSpot {
        description: description.to_string(),
        image_url: image_url.to_string(),
        map_url: map_url.to_string(),
    };
    ContentPool::new(vec![
        spot(
            "The Twilight Epiphany Skyspace puts on a light show at sunrise and sunset. \
             Bring a friend and look up.",
            "https://campus-assist.example/assets/skyspace.jpg",
            "https://goo.gl/maps/sdbMcc7XYhr",
        ),
        spot(
            "Willy's statue in the Academic Quad — the classic meeting point, and the \
             best people-watching bench on campus.",
            "https://campus-assist.example/assets/willy.jpg",
            "https://goo.gl/maps/dT9HpLCbF1S2",
        ),
        spot(
            "Brochstein Pavilion: glass walls, good coffee, and the shadiest tables on \
             the quad.",
            "https://campus-assist.example/assets/brochstein.jpg",
            "https://goo.gl/maps/nnkztZsBXUu",
        ),
        spot(
            "The stadium is open most mornings — run the ramps before it gets hot.",
            "https://campus-assist.example/assets/stadium.jpg",
            "https://goo.gl/maps/jZUxVLK1gR12",
        ),
        spot(
            "Harris Gully trail behind the graduate apartments. Herons, turtles, and \
             the occasional very confused duck.",
            "https://campus-assist.example/assets/gully.jpg",
            "https://goo.gl/maps/v7mnPsZkiM82",
        ),
    ])
}
