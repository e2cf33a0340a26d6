/// A square board of `size` x `size` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    size: u16,
}

impl Grid {
    pub fn new(size: u16) -> Self {
        Grid { size }
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    pub fn is_valid(&self, pos: Pos) -> bool {
        let size = self.size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }

    pub fn center(&self) -> Pos {
        let mid = (self.size / 2) as i32;
        Pos { x: mid, y: mid }
    }

    /// Every cell on the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Pos> {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Pos { x, y }))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Signed cell coordinates. Signed so a head that walked off the left or top
/// edge can still be represented and rejected by [`Grid::is_valid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosDelta {
    pub x: i32,
    pub y: i32,
}

impl From<Direction> for PosDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => PosDelta { x: 0, y: -1 },
            Direction::Down => PosDelta { x: 0, y: 1 },
            Direction::Right => PosDelta { x: 1, y: 0 },
            Direction::Left => PosDelta { x: -1, y: 0 },
        }
    }
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Pos { x, y }
    }

    pub fn offset(&self, delta: PosDelta) -> Pos {
        Pos {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }

    pub fn step(&self, dir: Direction) -> Pos {
        self.offset(dir.into())
    }
}
