pub(crate) mod metacritic;
